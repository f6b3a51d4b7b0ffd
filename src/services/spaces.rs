//! Spaces API.
//!
//! See: <https://www.elastic.co/guide/en/kibana/current/spaces-api.html>

use reqwest::Method;
use serde::Serialize;

use crate::client::{Client, Result};
use crate::http::{encode_segment, RequestOption};
use crate::model::Space;
use crate::response::Response;

const SPACES_PATH: &str = "spaces/space";

/// Handles the space related methods of the Kibana API.
#[derive(Debug, Clone, Copy)]
pub struct SpacesService<'a> {
    client: &'a Client,
}

/// Body of a create or update space request.
///
/// Unset fields are left out of the request body.
///
/// # Example
/// ```rust
/// use kibana_api::services::spaces::CreateSpaceOptions;
///
/// let opt = CreateSpaceOptions::new("marketing", "Marketing")
///     .with_description("This is the Marketing Space")
///     .with_disabled_features(["timelion"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_features: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Options for [`SpacesService::create_space`].
pub type CreateSpaceOptions = SpaceOptions;

/// Options for [`SpacesService::update_space`]. The id is always taken from
/// the path.
pub type UpdateSpaceOptions = SpaceOptions;

impl SpaceOptions {
    /// Options carrying the two fields Kibana requires.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the avatar color, as a hex code.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }

    pub fn with_disabled_features<I>(mut self, features: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.disabled_features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Set the avatar image, as a data URL.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Purpose filter for [`SpacesService::get_all_spaces`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpacePurpose {
    Any,
    CopySavedObjectsIntoSpace,
    ShareSavedObjectsIntoSpace,
}

/// Query parameters of [`SpacesService::get_all_spaces`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetAllSpacesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<SpacePurpose>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_authorized_purposes: Option<bool>,
}

impl GetAllSpacesOptions {
    pub fn with_purpose(mut self, purpose: SpacePurpose) -> Self {
        self.purpose = Some(purpose);
        self
    }

    pub fn with_include_authorized_purposes(mut self, include: bool) -> Self {
        self.include_authorized_purposes = Some(include);
        self
    }
}

impl<'a> SpacesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a space.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/spaces-api-post.html>
    pub async fn create_space(
        &self,
        opt: &CreateSpaceOptions,
        options: &[RequestOption],
    ) -> Result<(Space, Response)> {
        let req = self
            .client
            .new_request(Method::POST, SPACES_PATH, Some(opt), options)?;
        self.client.execute_json(req).await
    }

    /// Update a space. The body id is always set to `id`.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/spaces-api-put.html>
    pub async fn update_space(
        &self,
        id: &str,
        mut opt: UpdateSpaceOptions,
        options: &[RequestOption],
    ) -> Result<(Space, Response)> {
        let path = format!("{}/{}", SPACES_PATH, encode_segment(id)?);
        opt.id = Some(id.to_string());

        let req = self
            .client
            .new_request(Method::PUT, &path, Some(&opt), options)?;
        self.client.execute_json(req).await
    }

    /// Get a single space.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/spaces-api-get.html>
    pub async fn get_space(&self, id: &str, options: &[RequestOption]) -> Result<(Space, Response)> {
        let path = format!("{}/{}", SPACES_PATH, encode_segment(id)?);

        let req = self
            .client
            .new_request::<()>(Method::GET, &path, None, options)?;
        self.client.execute_json(req).await
    }

    /// List every space the caller can see.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/spaces-api-get-all.html>
    pub async fn get_all_spaces(
        &self,
        opt: Option<&GetAllSpacesOptions>,
        options: &[RequestOption],
    ) -> Result<(Vec<Space>, Response)> {
        let req = self
            .client
            .new_request(Method::GET, SPACES_PATH, opt, options)?;
        self.client.execute_json(req).await
    }

    /// Delete a space and everything saved in it.
    ///
    /// See: <https://www.elastic.co/guide/en/kibana/current/spaces-api-delete.html>
    pub async fn delete_space(&self, id: &str, options: &[RequestOption]) -> Result<Response> {
        let path = format!("{}/{}", SPACES_PATH, encode_segment(id)?);

        let req = self
            .client
            .new_request::<()>(Method::DELETE, &path, None, options)?;
        self.client.execute(req).await
    }
}
