//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod resource;
mod role;
mod user;

pub use resource::{
    ConnectorMetadata, Entitlement, EntitlementPurpose, Grant, Page, Resource, ResourceDetails,
    ResourceId, ResourceTrait, ResourceType, UserEmail,
};
pub use role::TeamRole;
pub use user::TeamUser;
