//! Kibana entities decoded from API responses.
//!
//! Fields map one to one onto the documented JSON attributes. Attributes
//! missing from a response decode to their default value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Kibana space.
///
/// See: <https://www.elastic.co/guide/en/kibana/current/spaces-api.html>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Hex color code of the space avatar
    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub initials: String,

    /// Feature ids hidden in this space
    #[serde(default)]
    pub disabled_features: Vec<String>,

    /// Data URL of the avatar image
    #[serde(default)]
    pub image_url: String,

    /// Set by Kibana for the default space, which cannot be deleted
    #[serde(default, rename = "_reserved", skip_serializing_if = "std::ops::Not::not")]
    pub reserved: bool,
}

/// A Kibana role.
///
/// See: <https://www.elastic.co/guide/en/kibana/current/role-management-api.html>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub name: String,

    pub metadata: RoleMetadata,

    #[serde(alias = "transientMetadata")]
    pub transient_metadata: TransientMetadata,

    pub elasticsearch: ElasticsearchPrivileges,

    pub kibana: Vec<KibanaPrivilege>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientMetadata {
    #[serde(default)]
    pub enabled: bool,
}

/// Cluster, index and run-as privileges granted by a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchPrivileges {
    pub cluster: Vec<String>,
    pub indices: Vec<ElasticsearchIndex>,
    pub run_as: Vec<String>,
}

/// Privileges over a set of indices.
///
/// See: <https://www.elastic.co/guide/en/elasticsearch/reference/current/defining-roles.html>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElasticsearchIndex {
    #[serde(default)]
    pub names: Vec<String>,

    #[serde(default)]
    pub privileges: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_security: Option<FieldSecurity>,

    /// Document level security query, as a JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_restricted_indices: Option<bool>,
}

impl ElasticsearchIndex {
    /// Grant `privileges` on the indices matching `names`.
    pub fn new<N, P>(names: N, privileges: P) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            privileges: privileges.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Field level security.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSecurity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<Vec<String>>,
}

/// Kibana privileges granted in a set of spaces.
///
/// See: <https://www.elastic.co/guide/en/kibana/current/kibana-privileges.html>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KibanaPrivilege {
    /// Base privileges such as `all` or `read`
    #[serde(default)]
    pub base: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<FeaturePrivileges>,

    /// Space ids, or `*` for every space
    #[serde(default)]
    pub spaces: Vec<String>,
}

/// Per-feature privileges.
///
/// Well-known features have their own field; any other feature id lands in
/// `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePrivileges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discover: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualize: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_tools: Option<Vec<String>>,

    #[serde(default, rename = "advancedSettings", skip_serializing_if = "Option::is_none")]
    pub advanced_settings: Option<Vec<String>>,

    #[serde(default, rename = "indexPatterns", skip_serializing_if = "Option::is_none")]
    pub index_patterns: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apm: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<Vec<String>>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Vec<String>>,
}
