use async_trait::async_trait;

use cloudamqp_core::AppResult;
use cloudamqp_domain::{TeamRole, TeamUser};

/// Port to the CloudAMQP team account.
///
/// Implementations perform no retries; every failure is returned to the
/// caller as-is.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Lists every member of the team account.
    async fn list_users(&self) -> AppResult<Vec<TeamUser>>;

    /// Replaces the role of a team member.
    async fn update_user_role(&self, user_id: &str, role: TeamRole) -> AppResult<()>;
}
