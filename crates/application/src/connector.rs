use std::sync::Arc;

use tracing::warn;

use cloudamqp_core::{AppError, AppResult};
use cloudamqp_domain::ConnectorMetadata;

use crate::{RoleSyncer, Syncer, TeamDirectory, UserSyncer};

/// Name reported in connector metadata.
pub const CONNECTOR_DISPLAY_NAME: &str = "CloudAMQP";

/// Behavior switches for a connector instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorOptions {
    /// Allows role grants and revokes to be written back to CloudAMQP.
    pub provisioning: bool,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self { provisioning: true }
    }
}

/// Entry point used by the connector host.
#[derive(Clone)]
pub struct CloudAmqpConnector {
    directory: Arc<dyn TeamDirectory>,
    options: ConnectorOptions,
}

impl CloudAmqpConnector {
    /// Creates a connector on top of a team directory.
    #[must_use]
    pub fn new(directory: Arc<dyn TeamDirectory>, options: ConnectorOptions) -> Self {
        Self { directory, options }
    }

    /// Returns the syncers for every resource kind, users first.
    #[must_use]
    pub fn resource_syncers(&self) -> Vec<Syncer> {
        vec![
            Syncer::User(UserSyncer::new(self.directory.clone())),
            Syncer::Role(RoleSyncer::new(
                self.directory.clone(),
                self.options.provisioning,
            )),
        ]
    }

    /// Returns static connector metadata.
    #[must_use]
    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: CONNECTOR_DISPLAY_NAME.to_owned(),
        }
    }

    /// Checks that the configured credentials can list team members.
    ///
    /// Every failure is reported as an authentication error, including
    /// transport failures.
    pub async fn validate(&self) -> AppResult<()> {
        match self.directory.list_users().await {
            Ok(_) => Ok(()),
            Err(error) => {
                warn!(error = %error, "cloudamqp credential validation failed");
                Err(AppError::Unauthenticated(
                    "Provided Access Token is invalid".to_owned(),
                ))
            }
        }
    }
}
