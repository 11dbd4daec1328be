use crate::inventory::domain::Credentials;
use crate::ports::outbound::SecretStore;
use crate::shared::security::{validate_regular_file, validate_secret_ref, MAX_SECRET_FILE_SIZE};
use crate::shared::{AssetError, AssetResult, BackendError, Collaborator, RequestContext};
use async_trait::async_trait;
use std::path::PathBuf;

/// FileSecretStore resolves secret references to JSON documents in a directory
///
/// The secret `acme-db` is read from `<dir>/acme-db.json`. References are
/// validated before use so they cannot escape the directory, and symlinked
/// or oversized secret files are rejected.
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn secret_error(details: impl Into<String>) -> AssetError {
        AssetError::backend(
            Collaborator::SecretStore,
            BackendError::Configuration(details.into()),
        )
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn resolve_secret(
        &self,
        ctx: &RequestContext,
        secret_ref: &str,
    ) -> AssetResult<Credentials> {
        validate_secret_ref(secret_ref).map_err(|e| Self::secret_error(e.to_string()))?;

        let path = self.dir.join(format!("{}.json", secret_ref));
        if !path.exists() {
            return Err(AssetError::not_found(format!(
                "secret '{}' does not exist",
                secret_ref
            )));
        }
        validate_regular_file(&path, "secret", MAX_SECRET_FILE_SIZE).map_err(|e| Self::secret_error(e.to_string()))?;

        let raw = ctx
            .run(async {
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| BackendError::Transport(e.to_string()))
            })
            .await
            .map_err(|e| AssetError::backend(Collaborator::SecretStore, e))?;

        Credentials::from_secret_json(&raw).map_err(|e| {
            AssetError::backend(
                Collaborator::SecretStore,
                BackendError::decode(format!("secret '{}'", secret_ref), e),
            )
        })
    }
}
