//! Error handling for the GM/T primitives

use std::borrow::Cow;
use std::fmt;

/// The error type for GM/T cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Malformed external encoding (hex, point prefix, DER structure)
    Encoding {
        /// Context where decoding failed
        context: &'static str,
        /// What was wrong with the input
        reason: &'static str,
    },

    /// Key outside its valid domain (scalar out of range, point off curve)
    Key {
        /// Context where the key was rejected
        context: &'static str,
        /// Why the key is invalid
        reason: &'static str,
    },

    /// Finite-field domain error (inversion of zero, non-residue square root)
    Field {
        /// Context where the operation failed
        context: &'static str,
        /// Why the operation is undefined
        reason: &'static str,
    },

    /// Block padding verification failed on decryption
    Padding {
        /// Cipher or mode that rejected the padding
        context: &'static str,
    },

    /// Ciphertext failed structural or integrity checks
    Ciphertext {
        /// Operation that rejected the ciphertext
        context: &'static str,
        /// What check failed
        reason: &'static str,
    },

    /// The platform CSPRNG failed to produce the requested bytes
    Random {
        /// Operation that needed randomness
        context: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for GM/T cryptographic operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Encoding { context, reason } => {
                write!(f, "Malformed encoding in {}: {}", context, reason)
            }
            Error::Key { context, reason } => {
                write!(f, "Invalid key in {}: {}", context, reason)
            }
            Error::Field { context, reason } => {
                write!(f, "Field operation failed in {}: {}", context, reason)
            }
            Error::Padding { context } => {
                write!(f, "Padding verification failed for {}", context)
            }
            Error::Ciphertext { context, reason } => {
                write!(f, "Invalid ciphertext in {}: {}", context, reason)
            }
            Error::Random { context } => {
                write!(f, "Random number generator failure in {}", context)
            }
        }
    }
}

impl std::error::Error for Error {}

pub mod validate;
