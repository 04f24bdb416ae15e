use std::fmt::{Display, Formatter};
use std::str::FromStr;

use cloudamqp_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Team access roles known to the CloudAMQP account API.
///
/// A CloudAMQP user always holds exactly one of these roles; `Member` is the
/// default assigned to new users and the fallback after a revoke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Full account administration.
    Admin,
    /// Instance management without billing access.
    Devops,
    /// Default role for every team member.
    #[default]
    Member,
    /// Read-only monitoring access.
    Monitor,
    /// Invoices and payment details.
    BillingManager,
    /// Audit and compliance reports.
    ComplianceManager,
}

impl TeamRole {
    /// Returns the role name as sent to and received from the API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Devops => "devops",
            Self::Member => "member",
            Self::Monitor => "monitor",
            Self::BillingManager => "billing manager",
            Self::ComplianceManager => "compliance manager",
        }
    }

    /// Returns the title-cased name shown to reviewers.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Devops => "Devops",
            Self::Member => "Member",
            Self::Monitor => "Monitor",
            Self::BillingManager => "Billing Manager",
            Self::ComplianceManager => "Compliance Manager",
        }
    }

    /// Returns every role in catalog order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TeamRole] = &[
            TeamRole::Admin,
            TeamRole::Devops,
            TeamRole::Member,
            TeamRole::Monitor,
            TeamRole::BillingManager,
            TeamRole::ComplianceManager,
        ];

        ALL
    }

    /// Parses an API role name into a catalog role.
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl Display for TeamRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TeamRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "devops" => Ok(Self::Devops),
            "member" => Ok(Self::Member),
            "monitor" => Ok(Self::Monitor),
            "billing manager" => Ok(Self::BillingManager),
            "compliance manager" => Ok(Self::ComplianceManager),
            _ => Err(AppError::Validation(format!(
                "unknown CloudAMQP team role '{value}'"
            ))),
        }
    }
}
