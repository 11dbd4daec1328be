use crate::shared::{AssetError, AssetResult, ErrorKind, ExitCode};
use serde::Serialize;

/// Message of every successful response without a more specific one
pub const SUCCESS_MESSAGE: &str = "success";

/// Message returned in place of any server-facing failure
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// ApiResponse - The `{data, message}` envelope every operation answers with
///
/// Failures carry `T::default()` as data and a coarse message. The full
/// error, with its tenant, asset and collaborator, is logged here and never
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
    #[serde(skip)]
    outcome: ExitCode,
}

impl<T: Default> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_message(data, SUCCESS_MESSAGE)
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            outcome: ExitCode::Success,
        }
    }

    pub fn failure(err: &AssetError) -> Self {
        let context = err.context();
        let tenant = context.tenant_id.as_deref().unwrap_or("-");
        let target_type = context.target_type.as_deref().unwrap_or("-");
        let asset = context.asset_id.as_deref().unwrap_or("-");
        let collaborator = context
            .collaborator
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());

        let (message, outcome) = match err.kind() {
            ErrorKind::ClientFacing => {
                tracing::warn!(tenant, target_type, asset, %collaborator, error = %err, "request rejected");
                (client_message(err), ExitCode::ClientFailure)
            }
            ErrorKind::ServerFacing => {
                tracing::error!(tenant, target_type, asset, %collaborator, error = %err, "request failed");
                (INTERNAL_ERROR_MESSAGE.to_string(), ExitCode::ServerFailure)
            }
        };

        Self {
            data: T::default(),
            message,
            outcome,
        }
    }

    /// Renders `result` with `render` on success and as a failure otherwise
    pub fn from_result<D>(result: AssetResult<D>, render: impl FnOnce(D) -> Self) -> Self {
        match result {
            Ok(value) => render(value),
            Err(err) => Self::failure(&err),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn outcome(&self) -> ExitCode {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ExitCode::Success
    }
}

fn client_message(err: &AssetError) -> String {
    match err {
        AssetError::Validation { message, .. } | AssetError::NotFound { message, .. } => {
            message.clone()
        }
        AssetError::Backend { .. } | AssetError::DomainInvariant { .. } => {
            INTERNAL_ERROR_MESSAGE.to_string()
        }
    }
}
