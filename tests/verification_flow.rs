use revovend_server::client::verification::VerificationHandler;
use revovend_server::client::ApiError;
use revovend_server::models::users::User;
use revovend_server::models::verification::{UserType, VerificationAction};
use revovend_server::services::http;
use revovend_server::services::verification;

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

// Runs a gate failure through the HTTP error mapping and back into the
// client handler, the same path a mobile session takes minus the socket.
fn classify(
    account: &User,
    action: VerificationAction,
) -> (u16, VerificationHandler) {
    let error = verification::check(account, action).unwrap_err();
    let (status, body) = http::error_body(&error);

    let api_error = ApiError::Api {
        status: status.as_u16(),
        body,
    };

    let mut handler = VerificationHandler::new();
    assert!(handler.handle_error(&api_error, action));

    (status.as_u16(), handler)
}

#[test]
fn unverified_business_owner_is_prompted_to_verify_before_hiring() {
    let account = user("business_owner", false, false);
    let (status, handler) = classify(&account, VerificationAction::HireContractor);

    assert_eq!(status, 403);

    let prompt = handler.active_prompt().unwrap();
    assert_eq!(prompt.user_type, UserType::BusinessOwner);
    assert_eq!(prompt.action, VerificationAction::HireContractor);
    assert!(prompt.message.contains("business owner"));
    assert!(!prompt.message.starts_with("VERIFICATION_REQUIRED"));
}

#[test]
fn missing_tax_form_prompts_the_event_host_on_accept_payment() {
    let account = user("event_host", true, false);
    let (_, handler) = classify(&account, VerificationAction::AcceptPayment);

    let prompt = handler.active_prompt().unwrap();
    assert_eq!(prompt.user_type, UserType::EventHost);
    assert!(prompt.message.contains("W-9"));
}

#[test]
fn unverified_contractor_is_prompted_on_apply() {
    let account = user("contractor", false, false);
    let (_, handler) = classify(&account, VerificationAction::ApplyToJob);

    let prompt = handler.active_prompt().unwrap();
    assert_eq!(prompt.user_type, UserType::Contractor);
}

#[test]
fn event_host_sending_a_proposal_gets_role_specific_wording() {
    let account = user("event_host", false, false);
    let (_, handler) = classify(&account, VerificationAction::SendProposal);

    let prompt = handler.active_prompt().unwrap();
    assert_eq!(prompt.user_type, UserType::EventHost);
    assert!(prompt.message.contains("event host"));
}

#[test]
fn verified_users_trigger_no_prompt() {
    let account = user("business_owner", true, true);

    for action in [
        VerificationAction::ApplyToJob,
        VerificationAction::HireContractor,
        VerificationAction::AcceptPayment,
        VerificationAction::SendProposal,
    ] {
        assert!(verification::check(&account, action).is_ok());
    }
}

#[test]
fn generic_failures_never_carry_the_verification_kind() {
    use revovend_server::services::ServiceError;

    let error = ServiceError::Database("connection reset".to_string());
    let (status, body) = http::error_body(&error);

    assert_eq!(status.as_u16(), 500);
    assert!(body.get("kind").is_none());
    // Internal error text stays out of the response body.
    assert_eq!(body["description"], "Internal server error.");

    let api_error = ApiError::Api {
        status: status.as_u16(),
        body,
    };
    let mut handler = VerificationHandler::new();
    assert!(!handler.handle_error(&api_error, VerificationAction::HireContractor));
}
