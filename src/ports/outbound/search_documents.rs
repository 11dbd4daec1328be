//! Typed views of the indexed document kinds this crate reads.

use crate::inventory::domain::{AssetIdentity, DocumentFields, Finding, FindingStatus};
use crate::ports::outbound::search_backend::SearchHit;
use crate::shared::BackendError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Fields requested for identity lookups
pub const IDENTITY_FIELDS: [&str; 4] = ["_docid", "targettypedisplayname", "docType", "_resourceid"];

/// Fields requested for finding lookups
pub const FINDING_FIELDS: [&str; 2] = ["policyId", "issueStatus"];

/// An issue document
#[derive(Debug, Clone, Deserialize)]
pub struct FindingDocument {
    #[serde(rename = "policyId")]
    pub policy_id: String,
    #[serde(rename = "issueStatus")]
    pub issue_status: String,
}

impl FindingDocument {
    /// Decodes the hit; the issue id is the hit's own `_id`
    pub fn finding_from_hit(hit: &SearchHit) -> Result<Finding, BackendError> {
        let doc: FindingDocument = hit.decode("finding document")?;
        let status = doc
            .issue_status
            .parse::<FindingStatus>()
            .map_err(|e| BackendError::decode("finding document", e))?;
        Ok(Finding::new(doc.policy_id, status, hit.id.clone()))
    }
}

/// An asset detail or child document with a schema that varies by type
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AssetDocument {
    fields: Map<String, Value>,
}

impl AssetDocument {
    pub fn from_hit(hit: &SearchHit) -> Result<Self, BackendError> {
        hit.decode("asset document")
    }
}

impl DocumentFields for AssetDocument {
    fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Identity fields of an indexed asset
#[derive(Debug, Clone, Deserialize)]
pub struct AssetIdentityDocument {
    #[serde(rename = "_docid")]
    pub doc_id: String,
    #[serde(rename = "targettypedisplayname", default)]
    pub type_display_name: Option<String>,
    #[serde(rename = "docType")]
    pub doc_type: String,
    #[serde(rename = "_resourceid")]
    pub resource_id: String,
}

impl From<AssetIdentityDocument> for AssetIdentity {
    fn from(doc: AssetIdentityDocument) -> Self {
        AssetIdentity {
            asset_type: doc.doc_type,
            resource_id: doc.resource_id,
            asset_id: doc.doc_id,
            type_display_name: doc.type_display_name,
        }
    }
}
