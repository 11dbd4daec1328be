use crate::inventory::domain::Credentials;
use crate::shared::{AssetResult, RequestContext};
use async_trait::async_trait;

/// SecretStore port for resolving a secret reference into credentials
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Resolves `secret_ref`.
    ///
    /// # Errors
    /// `NotFound` when no secret exists under the reference; `Backend`
    /// (collaborator `SecretStore`) when it cannot be read or decoded.
    async fn resolve_secret(&self, ctx: &RequestContext, secret_ref: &str)
        -> AssetResult<Credentials>;
}
