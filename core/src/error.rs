use thiserror::Error;

/// Errors produced by the portal core.
#[derive(Error, Debug)]
pub enum PortalError {
    /// The input string is not a valid token amount.
    #[error("invalid token amount: {input:?}")]
    InvalidAmount { input: String },

    /// The amount does not fit the 18-decimal base-unit range.
    #[error("token amount overflows the base-unit range")]
    AmountOverflow,

    /// The input string is not a valid 20-byte hex address.
    #[error("invalid address: {input:?}")]
    InvalidAddress { input: String },

    /// An account blob failed to decode (bad discriminator, truncated
    /// payload, invalid hex).
    #[error("account decode failed: {0}")]
    AccountDecode(#[from] std::io::Error),

    /// A per-index cooldown read went past the reported array bounds.
    #[error("cooldown index {index} out of bounds (len {len})")]
    CooldownIndexOutOfBounds { index: u32, len: u32 },

    /// The configuration is invalid (e.g. zero cooldown, precision too
    /// high).
    #[error("invalid portal configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Convenience result type for portal core operations.
pub type Result<T> = std::result::Result<T, PortalError>;
