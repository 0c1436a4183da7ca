//! # Terminology Records
//!
//! Data-transfer records exchanged with terminology servers.
//!
//! Fields use `#[serde(default)]` so that records from servers that omit
//! optional fields still parse. Unknown fields are ignored rather than
//! rejected; servers add fields between releases.

use serde::{Deserialize, Serialize};

use sct_core::is_valid_concept_id_format;

/// A terminology component addressable by identifier.
pub trait SnomedComponent {
    /// The component's own identifier.
    fn id(&self) -> Option<&str>;

    /// The concept this component is about, if it has a valid one.
    fn concept_id(&self) -> Option<&str>;
}

/// A reference set member as returned by a terminology server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefsetMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<String>,
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_effective_time: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_component_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_fields: Option<AdditionalFields>,
}

impl SnomedComponent for RefsetMember {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The referenced component, when it is a well-formed concept id.
    /// Description and relationship members resolve to `None`.
    fn concept_id(&self) -> Option<&str> {
        let referenced = self.referenced_component_id.as_deref();
        if is_valid_concept_id_format(referenced) {
            referenced
        } else {
            None
        }
    }
}

/// MRCM attribute fields carried by domain, attribute-domain and
/// attribute-range reference set members.
///
/// Serialized in the field order servers use, with absent values omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalFields {
    // Domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_template_for_postcoordination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_template_for_precoordination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximal_primitive_constraint: Option<String>,
    #[serde(rename = "guideURL", skip_serializing_if = "Option::is_none")]
    pub guide_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_constraint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximal_primitive_refinement: Option<String>,

    // Attribute domain
    pub grouped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_in_group_cardinality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_cardinality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_strength_id: Option<String>,

    // Attribute range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_constraint: Option<String>,
}
