pub mod context;
pub mod error;
pub mod result;
pub mod security;

pub use context::RequestContext;
pub use error::{AssetError, BackendError, Collaborator, ErrorContext, ErrorKind, ExitCode};
pub use result::{AssetResult, Result};
