use std::env;
use std::path::PathBuf;
use std::time::Duration;

use cloudamqp_core::{AppError, AppResult, NonEmptyString};
use cloudamqp_infrastructure::DEFAULT_CLOUDAMQP_API_BASE_URL;

/// Runtime settings of the sync binary.
#[derive(Clone)]
pub struct SyncConfig {
    pub api_key: NonEmptyString,
    pub api_base_url: String,
    pub http_timeout: Option<Duration>,
    pub provisioning: bool,
    pub output_path: PathBuf,
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SyncConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout", &self.http_timeout)
            .field("provisioning", &self.provisioning)
            .field("output_path", &self.output_path)
            .finish()
    }
}

impl SyncConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_key = lookup("CLOUDAMQP_API_KEY")
            .ok_or_else(|| AppError::Validation("CLOUDAMQP_API_KEY is required".to_owned()))
            .and_then(|value| {
                NonEmptyString::new(value).map_err(|_| {
                    AppError::Validation("CLOUDAMQP_API_KEY must not be empty".to_owned())
                })
            })?;
        let api_base_url = lookup("CLOUDAMQP_API_BASE_URL")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CLOUDAMQP_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let http_timeout = match lookup("CLOUDAMQP_HTTP_TIMEOUT_SECS") {
            Some(value) => {
                let seconds = value.trim().parse::<u64>().map_err(|error| {
                    AppError::Validation(format!(
                        "invalid CLOUDAMQP_HTTP_TIMEOUT_SECS value '{value}': {error}"
                    ))
                })?;
                if seconds == 0 {
                    return Err(AppError::Validation(
                        "CLOUDAMQP_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
                    ));
                }
                Some(Duration::from_secs(seconds))
            }
            None => None,
        };
        let provisioning = match lookup("CLOUDAMQP_PROVISIONING") {
            Some(value) => parse_bool("CLOUDAMQP_PROVISIONING", value.as_str())?,
            None => true,
        };
        let output_path = lookup("SYNC_OUTPUT_PATH")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("sync.json"), PathBuf::from);

        Ok(Self {
            api_key,
            api_base_url,
            http_timeout,
            provisioning,
            output_path,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "invalid {name} value '{value}': expected true or false"
        ))),
    }
}
