use crate::inventory::domain::{AssetIdentity, DocumentFields, RelatedAssetNode};
use crate::inventory::policies::RelatedAssetRule;
use crate::shared::{AssetError, AssetResult};

/// RelatedAssetLinker service assembling the related-asset list of a seed
/// asset from already-fetched documents
///
/// Pure business logic: the caller performs the searches.
pub struct RelatedAssetLinker;

impl RelatedAssetLinker {
    /// Extracts the native instance id that child documents reference
    ///
    /// # Errors
    /// `DomainInvariant` when the seed document lacks the field.
    pub fn native_id<'a, D: DocumentFields>(
        rule: &RelatedAssetRule,
        seed: &'a D,
    ) -> AssetResult<&'a str> {
        seed.text(&rule.native_id_field).ok_or_else(|| {
            AssetError::domain_invariant(format!(
                "asset document has no '{}' field",
                rule.native_id_field
            ))
        })
    }

    /// Classifies first-hop child documents into typed stubs.
    ///
    /// Sub-responses are walked in order; each hit is classified by its own
    /// `docType`. Documents of a type the rule does not know are skipped.
    ///
    /// # Errors
    /// `DomainInvariant` when a known child document lacks its resource id.
    pub fn classify_children<D: DocumentFields>(
        rule: &RelatedAssetRule,
        sub_responses: &[Vec<D>],
    ) -> AssetResult<Vec<RelatedAssetNode>> {
        let mut stubs = Vec::new();
        for hits in sub_responses {
            for doc in hits {
                let Some(child) = doc.text("docType").and_then(|t| rule.child_for(t)) else {
                    continue;
                };
                let resource_id = doc.text(&child.resource_id_field).ok_or_else(|| {
                    AssetError::domain_invariant(format!(
                        "{} document has no '{}' field",
                        child.doc_type, child.resource_id_field
                    ))
                })?;
                stubs.push(RelatedAssetNode::stub(resource_id, child.asset_type.as_str()));
            }
        }
        Ok(stubs)
    }

    /// Fills asset id and display type name on every stub matching an identity
    pub fn apply_identities(nodes: &mut [RelatedAssetNode], identities: &[AssetIdentity]) {
        for identity in identities {
            for node in nodes
                .iter_mut()
                .filter(|n| n.matches(&identity.asset_type, &identity.resource_id))
            {
                node.asset_id = Some(identity.asset_id.clone());
                node.type_display_name = identity.type_display_name.clone();
            }
        }
    }

    /// Synthetic nodes for the scalar cross-references present on the seed
    pub fn scalar_extras<D: DocumentFields>(
        rule: &RelatedAssetRule,
        seed: &D,
    ) -> Vec<RelatedAssetNode> {
        rule.scalar_extras
            .iter()
            .filter_map(|extra| {
                seed.text(&extra.field)
                    .map(|value| RelatedAssetNode::scalar(value, extra.display_name.as_str()))
            })
            .collect()
    }
}
