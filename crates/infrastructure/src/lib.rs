//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_team_directory;

pub use http_team_directory::{
    DEFAULT_CLOUDAMQP_API_BASE_URL, HttpTeamDirectory, basic_authorization,
};
