//! Role management API.
//!
//! See: <https://www.elastic.co/guide/en/kibana/current/role-management-api.html>

use reqwest::Method;
use serde::Serialize;

use crate::client::{Client, Result};
use crate::http::{encode_segment, RequestOption};
use crate::model::{ElasticsearchIndex, KibanaPrivilege, Role, RoleMetadata};
use crate::response::Response;

const ROLES_PATH: &str = "security/role";

/// Handles the role related methods of the Kibana API.
#[derive(Debug, Clone, Copy)]
pub struct RolesService<'a> {
    client: &'a Client,
}

/// Elasticsearch part of [`CreateOrUpdateRoleOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElasticsearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<ElasticsearchIndex>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_as: Option<Vec<String>>,
}

/// Body of a create or update role request.
///
/// # Example
/// ```rust
/// use kibana_api::model::{ElasticsearchIndex, KibanaPrivilege};
/// use kibana_api::services::roles::{CreateOrUpdateRoleOptions, ElasticsearchOptions};
///
/// let opt = CreateOrUpdateRoleOptions::default()
///     .with_elasticsearch(ElasticsearchOptions {
///         cluster: Some(vec!["monitor".to_string()]),
///         indices: Some(vec![ElasticsearchIndex::new(["logs-*"], ["read"])]),
///         run_as: None,
///     })
///     .with_kibana(vec![KibanaPrivilege {
///         base: vec!["read".to_string()],
///         feature: None,
///         spaces: vec!["*".to_string()],
///     }]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateOrUpdateRoleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RoleMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elasticsearch: Option<ElasticsearchOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kibana: Option<Vec<KibanaPrivilege>>,
}

impl CreateOrUpdateRoleOptions {
    pub fn with_version(mut self, version: i64) -> Self {
        self.metadata = Some(RoleMetadata {
            version: Some(version),
        });
        self
    }

    pub fn with_elasticsearch(mut self, elasticsearch: ElasticsearchOptions) -> Self {
        self.elasticsearch = Some(elasticsearch);
        self
    }

    pub fn with_kibana(mut self, kibana: Vec<KibanaPrivilege>) -> Self {
        self.kibana = Some(kibana);
        self
    }
}

impl<'a> RolesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create or update a role.
    ///
    /// Kibana answers with `204 No Content`, so only the response is returned.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/role-management-api-put.html>
    pub async fn create_or_update_role(
        &self,
        name: &str,
        opt: &CreateOrUpdateRoleOptions,
        options: &[RequestOption],
    ) -> Result<Response> {
        let path = format!("{}/{}", ROLES_PATH, encode_segment(name)?);

        let req = self
            .client
            .new_request(Method::PUT, &path, Some(opt), options)?;
        self.client.execute(req).await
    }

    /// Get a single role.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/role-management-specific-api-get.html>
    pub async fn get_role(&self, name: &str, options: &[RequestOption]) -> Result<(Role, Response)> {
        let path = format!("{}/{}", ROLES_PATH, encode_segment(name)?);

        let req = self
            .client
            .new_request::<()>(Method::GET, &path, None, options)?;
        self.client.execute_json(req).await
    }

    /// List all roles.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/role-management-api-get.html>
    pub async fn get_all_roles(&self, options: &[RequestOption]) -> Result<(Vec<Role>, Response)> {
        let req = self
            .client
            .new_request::<()>(Method::GET, ROLES_PATH, None, options)?;
        self.client.execute_json(req).await
    }

    /// Delete a role.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/role-management-api-delete.html>
    pub async fn delete_role(&self, name: &str, options: &[RequestOption]) -> Result<Response> {
        let path = format!("{}/{}", ROLES_PATH, encode_segment(name)?);

        let req = self
            .client
            .new_request::<()>(Method::DELETE, &path, None, options)?;
        self.client.execute(req).await
    }
}
