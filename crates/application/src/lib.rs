//! Application services and ports.

#![forbid(unsafe_code)]

mod connector;
mod resource_syncer;
mod resource_types;
mod role_syncer;
mod sync_service;
mod team_ports;
mod user_syncer;

#[cfg(test)]
mod test_support;

pub use connector::{CONNECTOR_DISPLAY_NAME, CloudAmqpConnector, ConnectorOptions};
pub use resource_syncer::{ResourceSyncer, Syncer};
pub use resource_types::{
    ROLE_MEMBER_ENTITLEMENT, ROLE_RESOURCE_TYPE_ID, USER_RESOURCE_TYPE_ID, role_resource_type,
    user_resource_type,
};
pub use role_syncer::{RoleSyncer, member_entitlement, role_resource};
pub use sync_service::{SyncService, SyncSnapshot};
pub use team_ports::TeamDirectory;
pub use user_syncer::{UserSyncer, user_resource};
