//! Per-resource-kind sync surface consumed by the connector host.

use async_trait::async_trait;

use cloudamqp_core::{AppError, AppResult};
use cloudamqp_domain::{Entitlement, Grant, Page, Resource, ResourceId, ResourceType};

use crate::{RoleSyncer, UserSyncer};

/// Lists resources, entitlements and grants for one resource kind and
/// optionally writes grants back to the source system.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// Returns the resource type handled by this syncer.
    fn resource_type(&self) -> ResourceType;

    /// Lists resources, optionally scoped to a parent resource.
    async fn list(
        &self,
        parent_id: Option<&ResourceId>,
        page_token: Option<&str>,
    ) -> AppResult<Page<Resource>>;

    /// Lists entitlements attached to `resource`.
    async fn entitlements(
        &self,
        resource: &Resource,
        page_token: Option<&str>,
    ) -> AppResult<Page<Entitlement>>;

    /// Lists grants of entitlements attached to `resource`.
    async fn grants(&self, resource: &Resource, page_token: Option<&str>) -> AppResult<Page<Grant>>;

    /// Grants `entitlement` to `principal` in the source system.
    async fn grant(&self, _principal: &Resource, _entitlement: &Entitlement) -> AppResult<()> {
        Err(AppError::Unsupported(format!(
            "resource type '{}' does not support grants",
            self.resource_type().id
        )))
    }

    /// Removes `grant` in the source system.
    async fn revoke(&self, _grant: &Grant) -> AppResult<()> {
        Err(AppError::Unsupported(format!(
            "resource type '{}' does not support revokes",
            self.resource_type().id
        )))
    }
}

/// The concrete syncers handed out by the connector.
#[derive(Clone)]
pub enum Syncer {
    /// Team members.
    User(UserSyncer),
    /// Team access roles.
    Role(RoleSyncer),
}

#[async_trait]
impl ResourceSyncer for Syncer {
    fn resource_type(&self) -> ResourceType {
        match self {
            Self::User(syncer) => syncer.resource_type(),
            Self::Role(syncer) => syncer.resource_type(),
        }
    }

    async fn list(
        &self,
        parent_id: Option<&ResourceId>,
        page_token: Option<&str>,
    ) -> AppResult<Page<Resource>> {
        match self {
            Self::User(syncer) => syncer.list(parent_id, page_token).await,
            Self::Role(syncer) => syncer.list(parent_id, page_token).await,
        }
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        page_token: Option<&str>,
    ) -> AppResult<Page<Entitlement>> {
        match self {
            Self::User(syncer) => syncer.entitlements(resource, page_token).await,
            Self::Role(syncer) => syncer.entitlements(resource, page_token).await,
        }
    }

    async fn grants(
        &self,
        resource: &Resource,
        page_token: Option<&str>,
    ) -> AppResult<Page<Grant>> {
        match self {
            Self::User(syncer) => syncer.grants(resource, page_token).await,
            Self::Role(syncer) => syncer.grants(resource, page_token).await,
        }
    }

    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> AppResult<()> {
        match self {
            Self::User(syncer) => syncer.grant(principal, entitlement).await,
            Self::Role(syncer) => syncer.grant(principal, entitlement).await,
        }
    }

    async fn revoke(&self, grant: &Grant) -> AppResult<()> {
        match self {
            Self::User(syncer) => syncer.revoke(grant).await,
            Self::Role(syncer) => syncer.revoke(grant).await,
        }
    }
}
