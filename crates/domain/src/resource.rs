//! Generic access-governance model produced by resource syncers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Behavioral traits a resource type can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    /// Resource is a principal that can receive grants.
    User,
    /// Resource is a role that principals can be assigned to.
    Role,
}

/// Describes one kind of resource exposed by a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Stable resource type identifier.
    pub id: String,
    /// Human readable name.
    pub display_name: String,
    /// Traits attached to every resource of this type.
    pub traits: Vec<ResourceTrait>,
}

impl ResourceType {
    /// Creates a resource type descriptor.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        traits: Vec<ResourceTrait>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            traits,
        }
    }
}

/// Fully qualified resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    /// Identifier of the resource type.
    pub resource_type: String,
    /// Identifier of the resource within its type.
    pub resource: String,
}

impl ResourceId {
    /// Creates a resource identifier.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource: resource.into(),
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}", self.resource_type, self.resource)
    }
}

/// Email address attached to a user resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    /// Email address.
    pub address: String,
    /// Whether this is the primary, verified address of the account.
    pub is_primary: bool,
}

/// Trait-specific data carried by a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trait", rename_all = "snake_case")]
pub enum ResourceDetails {
    /// User trait payload.
    User {
        /// Known email addresses.
        emails: Vec<UserEmail>,
        /// Free-form profile attributes.
        profile: Map<String, Value>,
    },
    /// Role trait payload.
    Role {
        /// Free-form profile attributes.
        profile: Map<String, Value>,
    },
}

/// A user or role exposed to the governance model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Fully qualified identifier.
    pub id: ResourceId,
    /// Human readable name.
    pub display_name: String,
    /// Trait-specific data.
    pub details: ResourceDetails,
}

impl Resource {
    /// Creates a user resource.
    #[must_use]
    pub fn user(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        emails: Vec<UserEmail>,
        profile: Map<String, Value>,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type.id.as_str(), id),
            display_name: display_name.into(),
            details: ResourceDetails::User { emails, profile },
        }
    }

    /// Creates a role resource.
    #[must_use]
    pub fn role(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        profile: Map<String, Value>,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type.id.as_str(), id),
            display_name: display_name.into(),
            details: ResourceDetails::Role { profile },
        }
    }

    /// Returns whether the resource belongs to the given type.
    #[must_use]
    pub fn is_of_type(&self, resource_type: &ResourceType) -> bool {
        self.id.resource_type == resource_type.id
    }

    /// Returns the profile attributes regardless of trait.
    #[must_use]
    pub fn profile(&self) -> &Map<String, Value> {
        match &self.details {
            ResourceDetails::User { profile, .. } | ResourceDetails::Role { profile } => profile,
        }
    }
}

/// How an entitlement is meant to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    /// Membership-style assignment to the resource.
    Assignment,
}

/// Grantable capability attached to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Stable identifier: `<resource type>:<resource>:<slug>`.
    pub id: String,
    /// Resource the entitlement belongs to.
    pub resource: Resource,
    /// Short machine name unique within the resource.
    pub slug: String,
    /// Human readable name.
    pub display_name: String,
    /// Longer description.
    pub description: String,
    /// Purpose of the entitlement.
    pub purpose: EntitlementPurpose,
    /// Resource types whose resources may receive this entitlement.
    pub grantable_to: Vec<ResourceType>,
}

impl Entitlement {
    /// Creates an assignment entitlement on the given resource.
    #[must_use]
    pub fn assignment(
        resource: &Resource,
        slug: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        grantable_to: Vec<ResourceType>,
    ) -> Self {
        let slug = slug.into();
        Self {
            id: format!("{}:{slug}", resource.id),
            resource: resource.clone(),
            slug,
            display_name: display_name.into(),
            description: description.into(),
            purpose: EntitlementPurpose::Assignment,
            grantable_to,
        }
    }

    /// Returns whether principals of the given type may hold this entitlement.
    #[must_use]
    pub fn is_grantable_to(&self, resource_type_id: &str) -> bool {
        self.grantable_to
            .iter()
            .any(|resource_type| resource_type.id == resource_type_id)
    }
}

/// Edge recording that a principal holds an entitlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// Stable identifier: `<entitlement id>:<principal id>`.
    pub id: String,
    /// Entitlement held by the principal.
    pub entitlement: Entitlement,
    /// Principal holding the entitlement.
    pub principal: ResourceId,
}

impl Grant {
    /// Creates a grant of `entitlement` to `principal`.
    #[must_use]
    pub fn new(entitlement: &Entitlement, principal: ResourceId) -> Self {
        Self {
            id: format!("{}:{principal}", entitlement.id),
            entitlement: entitlement.clone(),
            principal,
        }
    }
}

/// Static description of a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
    /// Name shown in the governance UI.
    pub display_name: String,
}

/// One page of syncer results.
///
/// `next_page_token` is `None` once the listing is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Token to request the following page.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates a final page holding every item.
    #[must_use]
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }

    /// Creates an empty final page.
    #[must_use]
    pub fn empty() -> Self {
        Self::complete(Vec::new())
    }
}
