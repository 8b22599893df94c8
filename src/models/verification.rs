use serde::{Deserialize, Serialize};

/// Roles a verification prompt can steer a user toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Contractor,
    BusinessOwner,
    EventHost,
}

impl UserType {
    pub fn from_role(role: &str) -> Option<UserType> {
        match role {
            "contractor" => Some(UserType::Contractor),
            "business_owner" => Some(UserType::BusinessOwner),
            "event_host" => Some(UserType::EventHost),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Contractor => "contractor",
            UserType::BusinessOwner => "business_owner",
            UserType::EventHost => "event_host",
        }
    }
}

/// Marketplace actions that require a completed verification first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationAction {
    ApplyToJob,
    HireContractor,
    AcceptPayment,
    SendProposal,
}
