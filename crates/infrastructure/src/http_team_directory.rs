use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use cloudamqp_application::TeamDirectory;
use cloudamqp_core::{AppError, AppResult};
use cloudamqp_domain::{TeamRole, TeamUser};

/// Production base URL of the CloudAMQP customer API.
pub const DEFAULT_CLOUDAMQP_API_BASE_URL: &str = "https://customer.cloudamqp.com/api";

/// HTTP implementation of the team directory port.
///
/// Authenticates with HTTP Basic using an empty username and the API key as
/// password. Responses with a status of 300 or above fail with
/// [`AppError::RequestFailed`]; nothing is retried.
pub struct HttpTeamDirectory {
    http_client: reqwest::Client,
    base_url: Url,
    authorization: String,
}

impl HttpTeamDirectory {
    /// Creates a directory client for the API rooted at `base_url`.
    pub fn new(http_client: reqwest::Client, base_url: &str, api_key: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|error| {
            AppError::Validation(format!("invalid CloudAMQP API base URL '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "CloudAMQP API base URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            authorization: basic_authorization(api_key),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!(
                    "CloudAMQP API base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        let response = request
            .header(AUTHORIZATION, self.authorization.as_str())
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("cloudamqp request failed: {error}")))?;

        let status = response.status().as_u16();
        debug!(url = %response.url(), status, "cloudamqp response received");

        if status >= 300 {
            return Err(AppError::RequestFailed {
                status,
                message: "request failed".to_owned(),
            });
        }

        Ok(response)
    }
}

/// Builds the `Authorization` header value for an empty username and the
/// given password.
#[must_use]
pub fn basic_authorization(password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!(":{password}")))
}

#[async_trait]
impl TeamDirectory for HttpTeamDirectory {
    async fn list_users(&self) -> AppResult<Vec<TeamUser>> {
        let url = self.endpoint(&["team"])?;
        debug!(method = "GET", url = %url, "cloudamqp request");

        let response = self.execute(self.http_client.get(url)).await?;
        let body = response.bytes().await.map_err(|error| {
            AppError::Transport(format!("failed to read cloudamqp response body: {error}"))
        })?;

        serde_json::from_slice::<Vec<TeamUser>>(&body).map_err(|error| {
            AppError::Decode(format!("invalid cloudamqp team listing payload: {error}"))
        })
    }

    async fn update_user_role(&self, user_id: &str, role: TeamRole) -> AppResult<()> {
        let url = self.endpoint(&["team", user_id])?;
        debug!(method = "PUT", url = %url, role = %role, "cloudamqp request");

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("role", role.as_str())
            .finish();

        self.execute(
            self.http_client
                .put(url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body),
        )
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpTeamDirectory, basic_authorization};

    #[test]
    fn basic_authorization_uses_empty_username() {
        assert_eq!(basic_authorization("secret"), "Basic OnNlY3JldA==");
    }

    #[test]
    fn endpoints_extend_base_path() {
        let directory = HttpTeamDirectory::new(
            reqwest::Client::new(),
            "https://customer.cloudamqp.com/api/",
            "secret",
        )
        .unwrap_or_else(|error| panic!("client failed: {error}"));

        let team = directory
            .endpoint(&["team"])
            .unwrap_or_else(|error| panic!("endpoint failed: {error}"));
        let member = directory
            .endpoint(&["team", "a/b"])
            .unwrap_or_else(|error| panic!("endpoint failed: {error}"));

        assert_eq!(team.as_str(), "https://customer.cloudamqp.com/api/team");
        assert_eq!(
            member.as_str(),
            "https://customer.cloudamqp.com/api/team/a%2Fb"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = HttpTeamDirectory::new(reqwest::Client::new(), "not a url", "secret");
        assert!(result.is_err());
    }
}
