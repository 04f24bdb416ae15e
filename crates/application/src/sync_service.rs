//! Single-pass read of every syncer into a snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use cloudamqp_core::{AppResult, SyncRunId};
use cloudamqp_domain::{ConnectorMetadata, Entitlement, Grant, Resource, ResourceType};

use crate::{CloudAmqpConnector, ResourceSyncer, Syncer};

/// Everything read from CloudAMQP during one sync pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    /// Identifier of the pass.
    pub run_id: SyncRunId,
    /// Connector metadata at sync time.
    pub metadata: ConnectorMetadata,
    /// Time the pass started.
    pub started_at: DateTime<Utc>,
    /// Time the pass finished.
    pub completed_at: DateTime<Utc>,
    /// Resource types in syncer order.
    pub resource_types: Vec<ResourceType>,
    /// Resources of every type.
    pub resources: Vec<Resource>,
    /// Entitlements of every resource.
    pub entitlements: Vec<Entitlement>,
    /// Grants of every resource.
    pub grants: Vec<Grant>,
}

/// Runs a validated, linear sync over all syncers of a connector.
#[derive(Clone)]
pub struct SyncService {
    connector: CloudAmqpConnector,
}

impl SyncService {
    /// Creates a sync service for the given connector.
    #[must_use]
    pub fn new(connector: CloudAmqpConnector) -> Self {
        Self { connector }
    }

    /// Validates credentials, then reads resources, entitlements and grants
    /// from every syncer. The first error aborts the pass.
    pub async fn run(&self) -> AppResult<SyncSnapshot> {
        let run_id = SyncRunId::new();
        let started_at = Utc::now();

        self.connector.validate().await?;

        let mut resource_types = Vec::new();
        let mut resources = Vec::new();
        let mut entitlements = Vec::new();
        let mut grants = Vec::new();

        for syncer in self.connector.resource_syncers() {
            let resource_type = syncer.resource_type();
            let listed = list_all(&syncer).await.map_err(|error| {
                error.context(format!("failed to list '{}' resources", resource_type.id))
            })?;

            for resource in &listed {
                entitlements.extend(entitlements_all(&syncer, resource).await.map_err(|error| {
                    error.context(format!("failed to sync entitlements of '{}'", resource.id))
                })?);
                grants.extend(grants_all(&syncer, resource).await.map_err(|error| {
                    error.context(format!("failed to sync grants of '{}'", resource.id))
                })?);
            }

            debug!(
                run_id = %run_id,
                resource_type = %resource_type.id,
                resource_count = listed.len(),
                "synced resource type"
            );

            resources.extend(listed);
            resource_types.push(resource_type);
        }

        let snapshot = SyncSnapshot {
            run_id,
            metadata: self.connector.metadata(),
            started_at,
            completed_at: Utc::now(),
            resource_types,
            resources,
            entitlements,
            grants,
        };

        info!(
            run_id = %snapshot.run_id,
            resources = snapshot.resources.len(),
            entitlements = snapshot.entitlements.len(),
            grants = snapshot.grants.len(),
            "cloudamqp sync completed"
        );

        Ok(snapshot)
    }
}

fn next_token(token: Option<String>) -> Option<String> {
    token.filter(|value| !value.is_empty())
}

async fn list_all(syncer: &Syncer) -> AppResult<Vec<Resource>> {
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    loop {
        let page = syncer.list(None, page_token.as_deref()).await?;
        items.extend(page.items);
        page_token = next_token(page.next_page_token);
        if page_token.is_none() {
            return Ok(items);
        }
    }
}

async fn entitlements_all(syncer: &Syncer, resource: &Resource) -> AppResult<Vec<Entitlement>> {
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    loop {
        let page = syncer.entitlements(resource, page_token.as_deref()).await?;
        items.extend(page.items);
        page_token = next_token(page.next_page_token);
        if page_token.is_none() {
            return Ok(items);
        }
    }
}

async fn grants_all(syncer: &Syncer, resource: &Resource) -> AppResult<Vec<Grant>> {
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    loop {
        let page = syncer.grants(resource, page_token.as_deref()).await?;
        items.extend(page.items);
        page_token = next_token(page.next_page_token);
        if page_token.is_none() {
            return Ok(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cloudamqp_core::AppError;
    use cloudamqp_domain::TeamUser;

    use super::SyncService;
    use crate::test_support::FakeTeamDirectory;
    use crate::{CloudAmqpConnector, ConnectorOptions};

    fn service(directory: Arc<FakeTeamDirectory>) -> SyncService {
        SyncService::new(CloudAmqpConnector::new(
            directory,
            ConnectorOptions::default(),
        ))
    }

    #[tokio::test]
    async fn run_collects_users_roles_and_grants() {
        let directory = Arc::new(FakeTeamDirectory::with_users(vec![
            TeamUser::new("u-1", "a@example.com", vec!["admin".to_owned()]),
            TeamUser::new("u-2", "b@example.com", vec!["monitor".to_owned()]),
        ]));

        let snapshot = service(directory.clone())
            .run()
            .await
            .unwrap_or_else(|error| panic!("sync failed: {error}"));

        assert_eq!(snapshot.metadata.display_name, "CloudAMQP");
        assert_eq!(snapshot.resource_types.len(), 2);
        assert_eq!(snapshot.resources.len(), 8);
        assert_eq!(snapshot.entitlements.len(), 6);
        let grant_ids: Vec<&str> = snapshot
            .grants
            .iter()
            .map(|grant| grant.id.as_str())
            .collect();
        assert_eq!(
            grant_ids,
            vec!["role:admin:member:user:u-1", "role:monitor:member:user:u-2"]
        );
        assert!(snapshot.completed_at >= snapshot.started_at);
        // validate + user list + one grant listing per role
        assert_eq!(directory.list_calls().await, 8);
    }

    #[tokio::test]
    async fn run_stops_on_failed_validation() {
        let directory = Arc::new(FakeTeamDirectory::failing(401));

        let result = service(directory.clone()).run().await;

        assert!(matches!(result, Err(AppError::Unauthenticated(_))));
        assert_eq!(directory.list_calls().await, 1);
    }
}
