/// Type alias for Result with anyhow::Error as the error type.
/// Used at the binary edge and for configuration loading; the aggregation
/// layer itself returns [`crate::shared::error::AssetError`].
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result type of every aggregation-layer operation.
pub type AssetResult<T> = std::result::Result<T, crate::shared::error::AssetError>;
