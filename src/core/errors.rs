use std::convert::Infallible;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

// Error type alias used by the loader and command-line layers.
pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

// Result type alias used by the loader and command-line layers.
pub type Result<T> = std::result::Result<T, Error>;

// Result type returned by the prefix list operations.
pub type ListResult<T> = std::result::Result<T, PrefixListError>;

/*--------------------------------------------------------------------------------------
  Prefix List Error
--------------------------------------------------------------------------------------*/

/// Errors returned by [PrefixList](crate::PrefixList) operations. An address that is not
/// contained in the list is not an error; lookups report it as `Ok(None)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrefixListError {
    /// The prefix is malformed or its length is out of range for its address family.
    InvalidPrefix(String),

    /// The address is malformed.
    InvalidAddress(String),

    /// The list was queried before it was sorted, or was appended to after sorting.
    NotFinalized,
}

impl fmt::Display for PrefixListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixListError::InvalidPrefix(prefix) => write!(f, "Invalid IP prefix: {prefix}"),
            PrefixListError::InvalidAddress(address) => {
                write!(f, "Invalid IP address: {address}")
            }
            PrefixListError::NotFinalized => write!(f, "Prefix list is not sorted"),
        }
    }
}

impl std::error::Error for PrefixListError {}

impl From<Infallible> for PrefixListError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
