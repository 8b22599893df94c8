use std::error::Error;

use serde_json::Value;

use super::ApiError;
use crate::models::verification::{UserType, VerificationAction};

// Tag older backends prepend to the message string instead of sending
// structured fields.
const LEGACY_PREFIX: &str = "VERIFICATION_REQUIRED:";

/// Prompt guiding a user to complete verification before retrying an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationPrompt {
    pub message: String,
    pub user_type: UserType,
    pub action: VerificationAction,
}

/// Classifies failed remote calls into verification prompts.
///
/// Holds at most one active prompt; the latest classified error wins. The
/// consumer clears the prompt once the user has acknowledged it.
#[derive(Debug, Default)]
pub struct VerificationHandler {
    prompt: Option<VerificationPrompt>,
}

impl VerificationHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the error is a verification failure, storing a
    /// prompt for the caller to render. Any other value, including malformed
    /// payloads, is left to the caller's normal error path.
    pub fn handle_error(
        &mut self,
        error: &(dyn Error + 'static),
        action: VerificationAction,
    ) -> bool {
        let Some(ApiError::Api { body, .. }) = error.downcast_ref::<ApiError>() else {
            return false;
        };
        let Some((message, hint)) = extract_verification(body) else {
            return false;
        };

        // The server-side hint wins; without one the action alone decides.
        let user_type = hint.unwrap_or(match action {
            VerificationAction::AcceptPayment => UserType::EventHost,
            _ => UserType::Contractor,
        });

        self.prompt = Some(VerificationPrompt {
            message,
            user_type,
            action,
        });

        true
    }

    pub fn active_prompt(&self) -> Option<&VerificationPrompt> {
        self.prompt.as_ref()
    }

    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }
}

fn extract_verification(body: &Value) -> Option<(String, Option<UserType>)> {
    if body.get("kind").and_then(Value::as_str) == Some("verification_required") {
        let message = body.get("explanation")?.as_str()?.to_string();
        let hint = body
            .get("required_role")
            .and_then(|role| serde_json::from_value(role.clone()).ok());
        return Some((message, hint));
    }

    let message = body
        .get("description")
        .or_else(|| body.get("message"))?
        .as_str()?;
    let explanation = message.strip_prefix(LEGACY_PREFIX)?;
    let explanation = explanation.strip_prefix(' ').unwrap_or(explanation);

    Some((explanation.to_string(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(body: Value) -> ApiError {
        ApiError::Api { status: 403, body }
    }

    #[test]
    fn ignores_non_api_errors() {
        let mut handler = VerificationHandler::new();
        let error = std::io::Error::new(std::io::ErrorKind::TimedOut, "request timed out");

        assert!(!handler.handle_error(&error, VerificationAction::ApplyToJob));
        assert!(handler.active_prompt().is_none());
    }

    #[test]
    fn ignores_unrelated_api_errors() {
        let mut handler = VerificationHandler::new();
        let error = api_error(json!({ "description": "Internal server error." }));

        assert!(!handler.handle_error(&error, VerificationAction::HireContractor));
        assert!(handler.active_prompt().is_none());
    }

    #[test]
    fn ignores_malformed_verification_payloads() {
        let mut handler = VerificationHandler::new();

        let missing_explanation = api_error(json!({ "kind": "verification_required" }));
        assert!(!handler.handle_error(&missing_explanation, VerificationAction::ApplyToJob));

        let non_string_message = api_error(json!({ "description": 42 }));
        assert!(!handler.handle_error(&non_string_message, VerificationAction::ApplyToJob));

        assert!(handler.active_prompt().is_none());
    }

    #[test]
    fn uses_the_server_role_hint() {
        let mut handler = VerificationHandler::new();
        let error = api_error(json!({
            "kind": "verification_required",
            "explanation": "Please verify your business owner account before hiring",
            "required_role": "business_owner",
        }));

        assert!(handler.handle_error(&error, VerificationAction::HireContractor));

        let prompt = handler.active_prompt().unwrap();
        assert_eq!(
            prompt.message,
            "Please verify your business owner account before hiring"
        );
        assert_eq!(prompt.user_type, UserType::BusinessOwner);
        assert_eq!(prompt.action, VerificationAction::HireContractor);
    }

    #[test]
    fn accept_payment_maps_to_event_host_without_a_hint() {
        // The action alone decides; the message mentions no role.
        let mut handler = VerificationHandler::new();
        let error = api_error(json!({
            "kind": "verification_required",
            "explanation": "complete W-9 first",
            "required_role": null,
        }));

        assert!(handler.handle_error(&error, VerificationAction::AcceptPayment));

        let prompt = handler.active_prompt().unwrap();
        assert_eq!(prompt.message, "complete W-9 first");
        assert_eq!(prompt.user_type, UserType::EventHost);
    }

    #[test]
    fn apply_to_job_defaults_to_contractor() {
        let mut handler = VerificationHandler::new();
        let error = api_error(json!({
            "kind": "verification_required",
            "explanation": "Verify your identity first",
        }));

        assert!(handler.handle_error(&error, VerificationAction::ApplyToJob));
        assert_eq!(
            handler.active_prompt().unwrap().user_type,
            UserType::Contractor
        );
    }

    #[test]
    fn strips_the_legacy_message_prefix() {
        let mut handler = VerificationHandler::new();
        let error = api_error(json!({
            "description": "VERIFICATION_REQUIRED: Please verify your account",
        }));

        assert!(handler.handle_error(&error, VerificationAction::SendProposal));
        assert_eq!(
            handler.active_prompt().unwrap().message,
            "Please verify your account"
        );
    }

    #[test]
    fn tolerates_a_missing_space_after_the_legacy_prefix() {
        let mut handler = VerificationHandler::new();
        let error = api_error(json!({
            "message": "VERIFICATION_REQUIRED:complete W-9 first",
        }));

        assert!(handler.handle_error(&error, VerificationAction::AcceptPayment));

        let prompt = handler.active_prompt().unwrap();
        assert_eq!(prompt.message, "complete W-9 first");
        assert_eq!(prompt.user_type, UserType::EventHost);
    }

    #[test]
    fn latest_prompt_overwrites_the_previous_one() {
        let mut handler = VerificationHandler::new();

        let first = api_error(json!({
            "kind": "verification_required",
            "explanation": "first",
            "required_role": "business_owner",
        }));
        let second = api_error(json!({
            "kind": "verification_required",
            "explanation": "second",
            "required_role": "event_host",
        }));

        assert!(handler.handle_error(&first, VerificationAction::HireContractor));
        assert!(handler.handle_error(&second, VerificationAction::SendProposal));

        let prompt = handler.active_prompt().unwrap();
        assert_eq!(prompt.message, "second");
        assert_eq!(prompt.user_type, UserType::EventHost);
        assert_eq!(prompt.action, VerificationAction::SendProposal);
    }

    #[test]
    fn close_prompt_is_idempotent() {
        let mut handler = VerificationHandler::new();
        let error = api_error(json!({
            "kind": "verification_required",
            "explanation": "Verify your identity first",
        }));

        assert!(handler.handle_error(&error, VerificationAction::ApplyToJob));
        handler.close_prompt();
        assert!(handler.active_prompt().is_none());
        handler.close_prompt();
        assert!(handler.active_prompt().is_none());
    }
}
