//! API handlers and shared helpers.
//!
//! Handlers translate the core's error taxonomy into status codes here.
//! Login failures keep distinct per-gate messages (device vs. code vs.
//! challenge); collapsing them into a uniform 401 is a known hardening
//! option.

pub mod bind_device;
pub mod health;
pub mod login;
pub mod register;
pub mod root;

use crate::auth::AuthError;
use axum::http::StatusCode;

/// Map a core error kind to its HTTP status.
pub(crate) fn error_status(error: &AuthError) -> StatusCode {
    match error {
        AuthError::MissingField(_) | AuthError::DomainNotAllowed => StatusCode::BAD_REQUEST,
        AuthError::EmailInUse | AuthError::DeviceAlreadyBound => StatusCode::CONFLICT,
        AuthError::AccountNotFound => StatusCode::NOT_FOUND,
        AuthError::InvalidCredentials | AuthError::ParaphraseIncorrect => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::UntrustedDevice | AuthError::InvalidCode | AuthError::ChallengeRejected => {
            StatusCode::FORBIDDEN
        }
        AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status plus client-facing message for a core error.
///
/// Internal failures keep their detail in the logs, not the response body.
pub(crate) fn error_response(error: &AuthError) -> (StatusCode, String) {
    let status = error_status(error);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "internal error".to_string()
    } else {
        error.to_string()
    };
    (status, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(
            error_status(&AuthError::MissingField("email")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&AuthError::DomainNotAllowed),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(error_status(&AuthError::EmailInUse), StatusCode::CONFLICT);
        assert_eq!(
            error_status(&AuthError::DeviceAlreadyBound),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&AuthError::AccountNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_status(&AuthError::ParaphraseIncorrect),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_status(&AuthError::UntrustedDevice),
            StatusCode::FORBIDDEN
        );
        assert_eq!(error_status(&AuthError::InvalidCode), StatusCode::FORBIDDEN);
        assert_eq!(
            error_status(&AuthError::ChallengeRejected),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn internal_errors_hide_detail() {
        let error = AuthError::Internal(anyhow!("store exploded"));
        let (status, message) = error_response(&error);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "internal error");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let (status, message) = error_response(&AuthError::UntrustedDevice);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message, "untrusted device");
    }
}
