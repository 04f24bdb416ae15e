use cloudamqp_domain::{ResourceTrait, ResourceType};

/// Identifier of the user resource type.
pub const USER_RESOURCE_TYPE_ID: &str = "user";

/// Identifier of the role resource type.
pub const ROLE_RESOURCE_TYPE_ID: &str = "role";

/// Slug of the single assignment entitlement exposed by every role.
pub const ROLE_MEMBER_ENTITLEMENT: &str = "member";

/// Returns the descriptor for team members.
#[must_use]
pub fn user_resource_type() -> ResourceType {
    ResourceType::new(USER_RESOURCE_TYPE_ID, "User", vec![ResourceTrait::User])
}

/// Returns the descriptor for team access roles.
#[must_use]
pub fn role_resource_type() -> ResourceType {
    ResourceType::new(ROLE_RESOURCE_TYPE_ID, "Role", vec![ResourceTrait::Role])
}
