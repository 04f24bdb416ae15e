//! Team access roles as governance resources.
//!
//! The role catalog is fixed; only grants require a call to the API. Write
//! back replaces the single role a CloudAMQP user holds, so a revoke is a
//! re-assignment to `member` rather than a removal.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::warn;

use cloudamqp_core::{AppError, AppResult};
use cloudamqp_domain::{Entitlement, Grant, Page, Resource, ResourceId, ResourceType, TeamRole};

use crate::{
    ROLE_MEMBER_ENTITLEMENT, ResourceSyncer, TeamDirectory, USER_RESOURCE_TYPE_ID,
    role_resource_type, user_resource_type,
};

/// Syncer exposing the CloudAMQP role catalog.
#[derive(Clone)]
pub struct RoleSyncer {
    directory: Arc<dyn TeamDirectory>,
    provisioning: bool,
}

impl RoleSyncer {
    /// Creates a role syncer. Grant and revoke reach the API only when
    /// `provisioning` is enabled.
    #[must_use]
    pub fn new(directory: Arc<dyn TeamDirectory>, provisioning: bool) -> Self {
        Self {
            directory,
            provisioning,
        }
    }

    fn require_provisioning(&self, operation: &str) -> AppResult<()> {
        if self.provisioning {
            return Ok(());
        }

        Err(AppError::Unsupported(format!(
            "cloudamqp-connector: {operation} is disabled for this connector"
        )))
    }
}

/// Maps a catalog role into a role resource.
#[must_use]
pub fn role_resource(role: TeamRole) -> Resource {
    let mut profile = Map::new();
    profile.insert("role_id".to_owned(), Value::String(role.as_str().to_owned()));
    profile.insert(
        "role_name".to_owned(),
        Value::String(role.display_name().to_owned()),
    );

    Resource::role(
        &role_resource_type(),
        role.as_str(),
        role.display_name(),
        profile,
    )
}

/// Builds the `member` assignment entitlement of a role resource.
#[must_use]
pub fn member_entitlement(resource: &Resource) -> Entitlement {
    Entitlement::assignment(
        resource,
        ROLE_MEMBER_ENTITLEMENT,
        format!("{} role", resource.display_name),
        format!("{} CloudAMQP role", resource.display_name),
        vec![user_resource_type()],
    )
}

fn resource_role(resource: &Resource) -> AppResult<TeamRole> {
    if !resource.is_of_type(&role_resource_type()) {
        return Err(AppError::TypeMismatch(format!(
            "cloudamqp-connector: resource '{}' is not a role",
            resource.id
        )));
    }

    TeamRole::parse(resource.id.resource.as_str())
}

fn ensure_user_principal(principal: &ResourceId, message: &str) -> AppResult<()> {
    if principal.resource_type == USER_RESOURCE_TYPE_ID {
        return Ok(());
    }

    warn!(
        principal_id = %principal,
        principal_type = %principal.resource_type,
        "cloudamqp-connector: {message}"
    );

    Err(AppError::TypeMismatch(format!(
        "cloudamqp-connector: {message}"
    )))
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_type(&self) -> ResourceType {
        role_resource_type()
    }

    async fn list(
        &self,
        _parent_id: Option<&ResourceId>,
        _page_token: Option<&str>,
    ) -> AppResult<Page<Resource>> {
        Ok(Page::complete(
            TeamRole::all().iter().copied().map(role_resource).collect(),
        ))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _page_token: Option<&str>,
    ) -> AppResult<Page<Entitlement>> {
        resource_role(resource)?;
        Ok(Page::complete(vec![member_entitlement(resource)]))
    }

    async fn grants(
        &self,
        resource: &Resource,
        _page_token: Option<&str>,
    ) -> AppResult<Page<Grant>> {
        let role = resource_role(resource)?;
        let users = self
            .directory
            .list_users()
            .await
            .map_err(|error| error.context("cloudamqp-connector: failed to get users"))?;

        let entitlement = member_entitlement(resource);
        let grants = users
            .iter()
            .filter(|user| user.holds_role(role))
            .map(|user| {
                Grant::new(
                    &entitlement,
                    ResourceId::new(USER_RESOURCE_TYPE_ID, user.id.as_str()),
                )
            })
            .collect();

        Ok(Page::complete(grants))
    }

    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> AppResult<()> {
        ensure_user_principal(&principal.id, "only users can be granted roles")?;
        self.require_provisioning("grant")?;

        let role = resource_role(&entitlement.resource)?;
        self.directory
            .update_user_role(principal.id.resource.as_str(), role)
            .await
            .map_err(|error| error.context("cloudamqp-connector: failed to update user role"))
    }

    async fn revoke(&self, grant: &Grant) -> AppResult<()> {
        ensure_user_principal(&grant.principal, "only users can have roles revoked")?;
        self.require_provisioning("revoke")?;

        self.directory
            .update_user_role(grant.principal.resource.as_str(), TeamRole::default())
            .await
            .map_err(|error| error.context("cloudamqp-connector: failed to update user role"))
    }
}

#[cfg(test)]
mod tests;
