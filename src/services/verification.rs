use crate::models::users::User;
use crate::models::verification::{UserType, VerificationAction};

use super::ServiceError;

/// Checks the verification precondition for a gated marketplace action.
///
/// On an unmet precondition the error carries a complete user-displayable
/// explanation plus the role the caller should be steered to verify as. The
/// role hint is set here, where the required role is known, so clients never
/// infer it from message wording.
pub fn check(user: &User, action: VerificationAction) -> Result<(), ServiceError> {
    match action {
        VerificationAction::ApplyToJob => {
            if user.identity_verified {
                return Ok(());
            }
            Err(verification_required(
                "Please verify your identity before applying to jobs.".to_string(),
                Some(UserType::Contractor),
            ))
        }
        VerificationAction::HireContractor => {
            if user.identity_verified {
                return Ok(());
            }
            let role = account_role(user);
            Err(verification_required(
                format!(
                    "Please verify your {} account before hiring contractors.",
                    role_words(role)
                ),
                Some(role),
            ))
        }
        VerificationAction::SendProposal => {
            if user.identity_verified {
                return Ok(());
            }
            let role = account_role(user);
            Err(verification_required(
                format!(
                    "Please verify your {} account before sending proposals.",
                    role_words(role)
                ),
                Some(role),
            ))
        }
        VerificationAction::AcceptPayment => {
            if user.tax_form_submitted {
                return Ok(());
            }
            Err(verification_required(
                "Please submit your W-9 tax form before accepting payments.".to_string(),
                Some(UserType::EventHost),
            ))
        }
    }
}

fn verification_required(explanation: String, required_role: Option<UserType>) -> ServiceError {
    ServiceError::VerificationRequired {
        explanation,
        required_role,
    }
}

fn account_role(user: &User) -> UserType {
    UserType::from_role(&user.role).unwrap_or(UserType::Contractor)
}

fn role_words(role: UserType) -> &'static str {
    match role {
        UserType::Contractor => "contractor",
        UserType::BusinessOwner => "business owner",
        UserType::EventHost => "event host",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, identity_verified: bool, tax_form_submitted: bool) -> User {
        User {
            id: "user-1".to_string(),
            role: role.to_string(),
            identity_verified,
            tax_form_submitted,
            credits: 0,
            referred_by: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    fn expect_required(result: Result<(), ServiceError>) -> (String, Option<UserType>) {
        match result {
            Err(ServiceError::VerificationRequired {
                explanation,
                required_role,
            }) => (explanation, required_role),
            other => panic!("expected VerificationRequired, got {:?}", other),
        }
    }

    #[test]
    fn unverified_contractor_cannot_apply() {
        let result = check(&user("contractor", false, false), VerificationAction::ApplyToJob);
        let (explanation, role) = expect_required(result);
        assert!(explanation.contains("identity"));
        assert_eq!(role, Some(UserType::Contractor));
    }

    #[test]
    fn unverified_business_owner_cannot_hire() {
        let result = check(
            &user("business_owner", false, false),
            VerificationAction::HireContractor,
        );
        let (explanation, role) = expect_required(result);
        assert!(explanation.contains("business owner"));
        assert_eq!(role, Some(UserType::BusinessOwner));
    }

    #[test]
    fn unverified_event_host_cannot_send_proposals() {
        let result = check(
            &user("event_host", false, false),
            VerificationAction::SendProposal,
        );
        let (explanation, role) = expect_required(result);
        assert!(explanation.contains("event host"));
        assert_eq!(role, Some(UserType::EventHost));
    }

    #[test]
    fn missing_tax_form_blocks_accepting_payment() {
        // Identity verification alone is not enough for payments.
        let result = check(
            &user("event_host", true, false),
            VerificationAction::AcceptPayment,
        );
        let (explanation, role) = expect_required(result);
        assert!(explanation.contains("W-9"));
        assert_eq!(role, Some(UserType::EventHost));
    }

    #[test]
    fn verified_users_pass_every_gate() {
        let verified = user("business_owner", true, true);
        for action in [
            VerificationAction::ApplyToJob,
            VerificationAction::HireContractor,
            VerificationAction::AcceptPayment,
            VerificationAction::SendProposal,
        ] {
            assert!(check(&verified, action).is_ok());
        }
    }

    #[test]
    fn unknown_roles_fall_back_to_contractor_wording() {
        let result = check(
            &user("local_vendor", false, false),
            VerificationAction::HireContractor,
        );
        let (_, role) = expect_required(result);
        assert_eq!(role, Some(UserType::Contractor));
    }
}
