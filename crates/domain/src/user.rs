//! Team member records as returned by the CloudAMQP account API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::TeamRole;

/// A member of the CloudAMQP team account.
///
/// Mirrors the JSON shape of `GET /api/team` entries. Role names are kept
/// verbatim so roles the catalog does not know about survive a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamUser {
    /// Stable user identifier assigned by CloudAMQP.
    pub id: String,
    /// Login email address.
    pub email: String,
    /// Role names in API order. A missing or `null` list decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<String>,
}

impl TeamUser {
    /// Creates a team user record.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            roles,
        }
    }

    /// Returns the role names joined with commas, order preserved.
    #[must_use]
    pub fn joined_roles(&self) -> String {
        self.roles.join(",")
    }

    /// Returns whether the user holds the given role.
    ///
    /// A user with an empty role list implicitly holds `member`.
    #[must_use]
    pub fn holds_role(&self, role: TeamRole) -> bool {
        if self.roles.is_empty() {
            return role == TeamRole::default();
        }

        self.roles.iter().any(|name| name == role.as_str())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
