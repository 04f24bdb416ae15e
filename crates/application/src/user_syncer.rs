use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use cloudamqp_core::AppResult;
use cloudamqp_domain::{
    Entitlement, Grant, Page, Resource, ResourceId, ResourceType, TeamUser, UserEmail,
};

use crate::{ResourceSyncer, TeamDirectory, user_resource_type};

/// Syncer exposing team members as user resources.
///
/// Users never originate entitlements or grants; role membership is
/// reported from the role side.
#[derive(Clone)]
pub struct UserSyncer {
    directory: Arc<dyn TeamDirectory>,
}

impl UserSyncer {
    /// Creates a user syncer backed by the given directory.
    #[must_use]
    pub fn new(directory: Arc<dyn TeamDirectory>) -> Self {
        Self { directory }
    }
}

/// Maps a team member into a user resource.
#[must_use]
pub fn user_resource(user: &TeamUser) -> Resource {
    let mut profile = Map::new();
    profile.insert("login".to_owned(), Value::String(user.email.clone()));
    profile.insert("roles".to_owned(), Value::String(user.joined_roles()));

    Resource::user(
        &user_resource_type(),
        user.id.as_str(),
        user.email.as_str(),
        vec![UserEmail {
            address: user.email.clone(),
            is_primary: true,
        }],
        profile,
    )
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> ResourceType {
        user_resource_type()
    }

    async fn list(
        &self,
        _parent_id: Option<&ResourceId>,
        _page_token: Option<&str>,
    ) -> AppResult<Page<Resource>> {
        let users = self
            .directory
            .list_users()
            .await
            .map_err(|error| error.context("cloudamqp-connector: failed to list users"))?;

        Ok(Page::complete(users.iter().map(user_resource).collect()))
    }

    async fn entitlements(
        &self,
        _resource: &Resource,
        _page_token: Option<&str>,
    ) -> AppResult<Page<Entitlement>> {
        Ok(Page::empty())
    }

    async fn grants(
        &self,
        _resource: &Resource,
        _page_token: Option<&str>,
    ) -> AppResult<Page<Grant>> {
        Ok(Page::empty())
    }
}
