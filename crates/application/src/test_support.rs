use async_trait::async_trait;
use tokio::sync::Mutex;

use cloudamqp_core::{AppError, AppResult};
use cloudamqp_domain::{TeamRole, TeamUser};

use crate::TeamDirectory;

/// Team directory double recording every call.
#[derive(Default)]
pub(crate) struct FakeTeamDirectory {
    users: Mutex<Vec<TeamUser>>,
    updates: Mutex<Vec<(String, TeamRole)>>,
    list_calls: Mutex<usize>,
    failure_status: Option<u16>,
}

impl FakeTeamDirectory {
    pub(crate) fn with_users(users: Vec<TeamUser>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self {
            failure_status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) async fn list_calls(&self) -> usize {
        *self.list_calls.lock().await
    }

    pub(crate) async fn updates(&self) -> Vec<(String, TeamRole)> {
        self.updates.lock().await.clone()
    }

    fn check_failure(&self) -> AppResult<()> {
        match self.failure_status {
            Some(status) => Err(AppError::RequestFailed {
                status,
                message: "request failed".to_owned(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TeamDirectory for FakeTeamDirectory {
    async fn list_users(&self) -> AppResult<Vec<TeamUser>> {
        *self.list_calls.lock().await += 1;
        self.check_failure()?;
        Ok(self.users.lock().await.clone())
    }

    async fn update_user_role(&self, user_id: &str, role: TeamRole) -> AppResult<()> {
        self.updates.lock().await.push((user_id.to_owned(), role));
        self.check_failure()?;

        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|user| user.id == user_id) {
            user.roles = vec![role.as_str().to_owned()];
        }

        Ok(())
    }
}
