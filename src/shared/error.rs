use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI front door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The request succeeded (including "unmanaged" results and target types with no rule)
    Success = 0,
    /// The request was rejected: blank input or unknown tenant/asset
    ClientFailure = 1,
    /// Invalid command-line arguments or configuration
    InvalidArguments = 2,
    /// A backend or data-integrity failure
    ServerFailure = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ClientFailure => write!(f, "Client Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ServerFailure => write!(f, "Server Failure (3)"),
        }
    }
}

/// The external system a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    TenantConfigStore,
    SecretStore,
    SearchBackend,
    RelationalBackend,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::TenantConfigStore => "tenant-config-store",
            Collaborator::SecretStore => "secret-store",
            Collaborator::SearchBackend => "search-backend",
            Collaborator::RelationalBackend => "relational-backend",
        };
        f.write_str(name)
    }
}

/// Request coordinates attached to every error for logging at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub tenant_id: Option<String>,
    pub target_type: Option<String>,
    pub asset_id: Option<String>,
    pub collaborator: Option<Collaborator>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unset = "-";
        write!(
            f,
            "tenant={} target_type={} asset={} collaborator={}",
            self.tenant_id.as_deref().unwrap_or(unset),
            self.target_type.as_deref().unwrap_or(unset),
            self.asset_id.as_deref().unwrap_or(unset),
            self.collaborator
                .map(|c| c.to_string())
                .unwrap_or_else(|| unset.to_string())
        )
    }
}

/// Failures talking to a collaborator (transport, status, decoding, cancellation).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode {what}: {details}")]
    Decode { what: String, details: String },

    #[error("request was cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("invalid backend configuration: {0}")]
    Configuration(String),
}

impl BackendError {
    pub fn decode(what: impl Into<String>, details: impl fmt::Display) -> Self {
        BackendError::Decode {
            what: what.into(),
            details: details.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::decode("search response", err)
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                BackendError::decode("relational row", err)
            }
            sqlx::Error::Configuration(_) => BackendError::Configuration(err.to_string()),
            other => BackendError::Transport(other.to_string()),
        }
    }
}

/// Whether a failure is the caller's fault or ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ClientFacing,
    ServerFacing,
}

/// Error taxonomy of the aggregation layer.
///
/// Uses thiserror for Display; the [`ErrorContext`] is kept out of the message
/// and logged as structured fields instead.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A required input was blank
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    /// Unknown tenant, missing asset document, or empty mandatory result
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Transport or decode failure against a collaborator
    #[error("Backend error: {source}")]
    Backend {
        #[source]
        source: BackendError,
        context: ErrorContext,
    },

    /// A document was found but lacks a field it must carry
    #[error("Domain invariant violated: {message}")]
    DomainInvariant {
        message: String,
        context: ErrorContext,
    },
}

impl AssetError {
    pub fn validation(message: impl Into<String>) -> Self {
        AssetError::Validation {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AssetError::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn backend(collaborator: Collaborator, source: BackendError) -> Self {
        AssetError::Backend {
            source,
            context: ErrorContext {
                collaborator: Some(collaborator),
                ..ErrorContext::default()
            },
        }
    }

    pub fn domain_invariant(message: impl Into<String>) -> Self {
        AssetError::DomainInvariant {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AssetError::Validation { .. } | AssetError::NotFound { .. } => ErrorKind::ClientFacing,
            AssetError::Backend { .. } | AssetError::DomainInvariant { .. } => {
                ErrorKind::ServerFacing
            }
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            AssetError::Validation { context, .. }
            | AssetError::NotFound { context, .. }
            | AssetError::Backend { context, .. }
            | AssetError::DomainInvariant { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            AssetError::Validation { context, .. }
            | AssetError::NotFound { context, .. }
            | AssetError::Backend { context, .. }
            | AssetError::DomainInvariant { context, .. } => context,
        }
    }

    /// Records the tenant unless an inner layer already did.
    pub fn for_tenant(mut self, tenant_id: &str) -> Self {
        let context = self.context_mut();
        if context.tenant_id.is_none() {
            context.tenant_id = Some(tenant_id.to_string());
        }
        self
    }

    /// Records the target type and asset unless an inner layer already did.
    pub fn for_asset(mut self, target_type: &str, asset_id: &str) -> Self {
        let context = self.context_mut();
        if context.target_type.is_none() {
            context.target_type = Some(target_type.to_string());
        }
        if context.asset_id.is_none() && !asset_id.is_empty() {
            context.asset_id = Some(asset_id.to_string());
        }
        self
    }

    pub fn with_collaborator(mut self, collaborator: Collaborator) -> Self {
        let context = self.context_mut();
        if context.collaborator.is_none() {
            context.collaborator = Some(collaborator);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ClientFailure.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ServerFailure.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::ServerFailure), "Server Failure (3)");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            AssetError::validation("x").kind(),
            ErrorKind::ClientFacing
        );
        assert_eq!(AssetError::not_found("x").kind(), ErrorKind::ClientFacing);
        assert_eq!(
            AssetError::backend(Collaborator::SearchBackend, BackendError::Cancelled).kind(),
            ErrorKind::ServerFacing
        );
        assert_eq!(
            AssetError::domain_invariant("x").kind(),
            ErrorKind::ServerFacing
        );
    }

    #[test]
    fn test_context_is_filled_once() {
        let err = AssetError::backend(
            Collaborator::RelationalBackend,
            BackendError::Transport("connection refused".to_string()),
        )
        .for_tenant("acme")
        .for_asset("ec2", "i-123")
        .for_tenant("other")
        .with_collaborator(Collaborator::SearchBackend);

        let context = err.context();
        assert_eq!(context.tenant_id.as_deref(), Some("acme"));
        assert_eq!(context.target_type.as_deref(), Some("ec2"));
        assert_eq!(context.asset_id.as_deref(), Some("i-123"));
        assert_eq!(context.collaborator, Some(Collaborator::RelationalBackend));
    }

    #[test]
    fn test_backend_error_display_keeps_source() {
        let err = AssetError::backend(
            Collaborator::SearchBackend,
            BackendError::Status {
                status: 503,
                body: "unavailable".to_string(),
            },
        );
        let display = format!("{}", err);
        assert!(display.contains("Backend error"));
        assert!(display.contains("503"));
    }

    #[test]
    fn test_error_context_display() {
        let context = ErrorContext {
            tenant_id: Some("acme".to_string()),
            collaborator: Some(Collaborator::SecretStore),
            ..ErrorContext::default()
        };
        assert_eq!(
            context.to_string(),
            "tenant=acme target_type=- asset=- collaborator=secret-store"
        );
    }
}
