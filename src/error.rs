//! Crate-wide error types for spacenet.

use thiserror::Error;

/// Error type for spacenet core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed address, oversize/empty claimant, or malformed subnet string.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Read for an address with no current claim.
    #[error("not found")]
    NotFound,

    /// Submitted proof-of-work did not clear the required difficulty.
    #[error("insufficient difficulty: required {required}, got {actual}")]
    InsufficientDifficulty { required: u8, actual: u8 },

    /// The durable backend rejected a write; in-memory state was rolled back.
    #[error("backend write failed: {0}")]
    BackendWrite(String),

    /// The durable backend failed during the startup full scan. Fatal.
    #[error("backend read failed: {0}")]
    BackendRead(String),
}

/// Result type alias for spacenet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for claimant validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimantError {
    /// Claimant name is empty.
    #[error("claimant name must not be empty")]
    Empty,

    /// Claimant name exceeds the 24-byte limit.
    #[error("claimant name exceeds 24 bytes: got {0}")]
    TooLong(usize),
}

/// Error type for address parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Input did not parse as an IPv6 address.
    #[error("invalid IPv6 address: {0}")]
    InvalidAddress(String),
}

/// Error type for subnet-string parsing (`<address>/<prefix>`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetParseError {
    /// Missing or malformed `/<prefix>` suffix.
    #[error("malformed subnet string: {0}")]
    Malformed(String),

    /// Address portion did not parse.
    #[error(transparent)]
    Address(#[from] AddressError),
}

/// Error type for the proof-of-work client-side search utility.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PowError {
    /// No nonce below the attempt cap cleared the required difficulty.
    #[error("no solution found within {0} attempts")]
    SolveExhausted(u64),
}

/// Error type for durable backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The underlying storage engine reported an error.
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted record could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<ClaimantError> for Error {
    fn from(e: ClaimantError) -> Self {
        Error::BadRequest(e.to_string())
    }
}

impl From<AddressError> for Error {
    fn from(e: AddressError) -> Self {
        Error::BadRequest(e.to_string())
    }
}

impl From<SubnetParseError> for Error {
    fn from(e: SubnetParseError) -> Self {
        Error::BadRequest(e.to_string())
    }
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        Error::BackendWrite(e.to_string())
    }
}
