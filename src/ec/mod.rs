//! Elliptic curve primitives
//!
//! The GM/T 0003.5 recommended 256-bit prime curve used by the SM2
//! public-key algorithms.

pub mod sm2p256;

pub use sm2p256::{FieldElement, Point, PointFormat, Scalar};
