//! TOTP issuance and verification.
//!
//! RFC 6238 with SHA-1, 6 digits, and 30-second steps, compatible with stock
//! authenticator apps. Verification tolerates [`DRIFT_STEPS`] steps of clock
//! drift on each side and is a pure function of secret, time, and code; a
//! still-valid code verifies as many times as it is submitted.

use anyhow::{anyhow, Result};
use totp_rs::{Algorithm, Secret, TOTP};

/// Accepted clock-drift window, in steps on each side of the current one.
pub const DRIFT_STEPS: u8 = 2;
/// Issuer label embedded in provisioning URIs.
pub const ISSUER: &str = "ForumWeb";

const DIGITS: usize = 6;
const STEP_SECONDS: u64 = 30;

/// One-time enrollment material for a new account.
#[derive(Debug)]
pub struct Enrollment {
    /// Base32 shared secret, disclosed to the user exactly once.
    pub secret: String,
    /// `otpauth://` provisioning URI labeled with the account email.
    pub provisioning_uri: String,
    /// `data:image/png;base64,...` QR rendering of the provisioning URI.
    pub provisioning_image: String,
}

/// Issue a fresh shared secret labeled for `email`.
///
/// # Errors
/// Returns an error if secret generation or QR rendering fails.
pub fn enroll(email: &str) -> Result<Enrollment> {
    let secret = Secret::generate_secret();
    let secret_bytes = secret
        .to_bytes()
        .map_err(|e| anyhow!("Secret gen error: {e:?}"))?;

    let totp = build(secret_bytes, email)?;

    let qr = totp
        .get_qr_base64()
        .map_err(|e| anyhow!("QR gen error: {e}"))?;

    Ok(Enrollment {
        secret: totp.get_secret_base32(),
        provisioning_uri: totp.get_url(),
        provisioning_image: format!("data:image/png;base64,{qr}"),
    })
}

/// Check a submitted code against the current time step.
///
/// A malformed secret or a code of the wrong shape reports `false`, never an
/// error.
#[must_use]
pub fn verify(secret_base32: &str, code: &str) -> bool {
    parse(secret_base32).is_some_and(|totp| totp.check_current(code).unwrap_or(false))
}

/// Check a submitted code against an explicit unix timestamp.
///
/// Same drift window as [`verify`]; used by tests to pin the clock.
#[must_use]
pub fn verify_at(secret_base32: &str, code: &str, unix_time: u64) -> bool {
    parse(secret_base32).is_some_and(|totp| totp.check(code, unix_time))
}

/// Expected code for the step containing `unix_time`.
///
/// # Errors
/// Returns an error if the secret is not valid base32.
pub fn code_at(secret_base32: &str, unix_time: u64) -> Result<String> {
    let totp = parse(secret_base32).ok_or_else(|| anyhow!("invalid base32 secret"))?;
    Ok(totp.generate(unix_time))
}

fn parse(secret_base32: &str) -> Option<TOTP> {
    let secret_bytes = Secret::Encoded(secret_base32.to_string()).to_bytes().ok()?;
    build(secret_bytes, "account").ok()
}

fn build(secret_bytes: Vec<u8>, label: &str) -> Result<TOTP> {
    TOTP::new(
        Algorithm::SHA1,
        DIGITS,
        DRIFT_STEPS,
        STEP_SECONDS,
        secret_bytes,
        Some(ISSUER.to_string()),
        label.to_string(),
    )
    .map_err(|e| anyhow!("TOTP init error: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BASE_TIME: u64 = 1_700_000_000;

    fn enrolled_secret() -> String {
        enroll("alice@gmail.com").unwrap().secret
    }

    #[test]
    fn enroll_produces_provisioning_material() {
        let enrollment = enroll("alice@gmail.com").unwrap();
        assert!(!enrollment.secret.is_empty());
        assert!(enrollment.provisioning_uri.starts_with("otpauth://totp/"));
        assert!(enrollment.provisioning_uri.contains("ForumWeb"));
        assert!(enrollment
            .provisioning_image
            .starts_with("data:image/png;base64,"));
    }

    #[test]
    fn enroll_draws_a_fresh_secret_per_call() {
        assert_ne!(enrolled_secret(), enrolled_secret());
    }

    #[test]
    fn code_within_drift_window_is_accepted() {
        let secret = enrolled_secret();
        let code = code_at(&secret, BASE_TIME).unwrap();

        for step_offset in -2i64..=2 {
            let at = BASE_TIME.saturating_add_signed(step_offset * STEP_SECONDS as i64);
            assert!(
                verify_at(&secret, &code, at),
                "code rejected at step offset {step_offset}"
            );
        }
    }

    #[test]
    fn code_outside_drift_window_is_rejected() {
        let secret = enrolled_secret();
        let code = code_at(&secret, BASE_TIME).unwrap();

        assert!(!verify_at(&secret, &code, BASE_TIME + 3 * STEP_SECONDS));
        assert!(!verify_at(&secret, &code, BASE_TIME - 3 * STEP_SECONDS));
    }

    #[test]
    fn malformed_code_reports_false() {
        let secret = enrolled_secret();
        assert!(!verify_at(&secret, "12", BASE_TIME));
        assert!(!verify_at(&secret, "abcdef", BASE_TIME));
        assert!(!verify_at(&secret, "", BASE_TIME));
    }

    #[test]
    fn malformed_secret_reports_false() {
        assert!(!verify("not base32 !!!", "123456"));
        assert!(!verify_at("not base32 !!!", "123456", BASE_TIME));
    }

    #[test]
    fn verification_is_idempotent() {
        let secret = enrolled_secret();
        let code = code_at(&secret, BASE_TIME).unwrap();
        assert!(verify_at(&secret, &code, BASE_TIME));
        assert!(verify_at(&secret, &code, BASE_TIME));
    }
}
