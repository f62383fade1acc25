use thiserror::Error;

/// A list specifying categories of [`HdbError`](crate::HdbError).
///
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HdbError {
    /// A wire decimal was handed over with a length other than 16 bytes.
    #[error("A wire decimal must consist of exactly 16 bytes, found {length}")]
    WireLength {
        /// The length of the rejected input.
        length: usize,
    },

    /// The NULL representation was found in a column that is declared NOT NULL.
    #[error("Received null value for not-null column")]
    NullValue,

    /// Creating the wire representation of a value failed.
    #[error("Error occured in serialization: {}", _0)]
    Serialization(String),

    /// The configuration file is syntactically wrong.
    #[error("Erroneous configuration in line {line}: {reason}")]
    Config {
        /// Line number (1-based) of the offending line.
        line: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Erroneous Connection Parameters, e.g. a host that cannot be part of a URL.
    #[error("Erroneous Connection Parameters")]
    ConnParams {
        /// The causing Error.
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Hex input could not be decoded.
    #[error("Invalid hex input")]
    Hex {
        /// The causing Error.
        #[from]
        source: hex::FromHexError,
    },

    /// Error occured while reading or writing files.
    #[error(transparent)]
    Io {
        /// The causing Error.
        #[from]
        source: std::io::Error,
    },

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    Usage(&'static str),

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    UsageDetailed(String),
}

/// Abbreviation of `Result<T, HdbError>`.
pub type HdbResult<T> = std::result::Result<T, HdbError>;

impl HdbError {
    /// Reveal the inner error
    pub fn inner(&self) -> Option<&dyn std::error::Error> {
        match self {
            Self::ConnParams { source } => Some(&**source),
            Self::Hex { source } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn conn_params(error: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self::ConnParams { source: error }
    }

    pub(crate) fn config<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::Config {
            line,
            reason: reason.into(),
        }
    }
}

#[macro_export]
macro_rules! usage_err {
    ($($arg:tt)*) => {{
        $crate::HdbError::UsageDetailed(format!($($arg)*))
    }};
}
