use crate::shared::{AssetError, AssetResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Maximum length for tenant ids
const MAX_TENANT_ID_LENGTH: usize = 128;

/// NewType wrapper for a tenant id with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> AssetResult<Self> {
        let id = id.into();
        let trimmed = id.trim();

        if trimmed.is_empty() {
            return Err(AssetError::validation("tenant id must be present"));
        }

        if trimmed.len() > MAX_TENANT_ID_LENGTH {
            return Err(AssetError::validation(format!(
                "tenant id is too long ({} bytes). Maximum allowed: {} bytes",
                trimmed.len(),
                MAX_TENANT_ID_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend coordinates for a tenant, as stored in the tenant config store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantBackendConfig {
    pub search_endpoint: String,
    pub secret_ref: String,
}

/// Relational connection record stored in a tenant's secret
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RelationalCredentials {
    #[serde(rename = "DB_USERNAME")]
    pub username: String,
    #[serde(rename = "DB_PASSWORD")]
    pub password: String,
    #[serde(rename = "DB_HOST")]
    pub host: String,
    #[serde(rename = "DB_PORT")]
    pub port: String,
    #[serde(rename = "DB_NAME")]
    pub database: String,
}

impl RelationalCredentials {
    pub fn port_number(&self) -> Option<u16> {
        self.port.trim().parse().ok()
    }
}

impl fmt::Debug for RelationalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationalCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

/// Resolved secret material for a tenant
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    KeyValue(BTreeMap<String, String>),
    Relational(RelationalCredentials),
}

impl Credentials {
    /// Decodes a secret document.
    ///
    /// A document carrying every relational key is decoded as
    /// [`RelationalCredentials`]; any other JSON object of strings becomes a
    /// key/value map.
    pub fn from_secret_json(raw: &str) -> Result<Self, serde_json::Error> {
        if let Ok(relational) = serde_json::from_str::<RelationalCredentials>(raw) {
            return Ok(Credentials::Relational(relational));
        }
        serde_json::from_str::<BTreeMap<String, String>>(raw).map(Credentials::KeyValue)
    }

    pub fn relational(&self) -> Option<&RelationalCredentials> {
        match self {
            Credentials::Relational(credentials) => Some(credentials),
            Credentials::KeyValue(_) => None,
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        match self {
            Credentials::KeyValue(map) => map.get(key).map(String::as_str),
            Credentials::Relational(_) => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::KeyValue(map) => f
                .debug_tuple("KeyValue")
                .field(&map.keys().collect::<Vec<_>>())
                .finish(),
            Credentials::Relational(credentials) => {
                f.debug_tuple("Relational").field(credentials).finish()
            }
        }
    }
}

/// Fully resolved tenant: immutable once built and shared with the clients
/// constructed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub search_endpoint: String,
    pub credentials: Credentials,
}
