//! Account records and their public projection.
//!
//! Field names serialize in camelCase, matching the wire format and the
//! stored account collection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One registered user, as persisted in the account collection.
///
/// Created once by registration, mutated only by bind-device (appending to
/// `trusted_devices`). Nothing removes a device or rotates the TOTP secret
/// or paraphrase.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string; never transmitted back to a client.
    pub password_hash: String,
    /// Base32 shared secret for TOTP; generated once at registration.
    pub totp_secret: String,
    /// Argon2id PHC string of the recovery paraphrase; the salt is embedded
    /// in the encoded form.
    pub paraphrase_hash: String,
    /// Public half of the registration keypair, kept for a future
    /// challenge-response protocol. The private half is never persisted.
    pub public_key: String,
    /// Devices permitted to authenticate this account. Seeded with exactly
    /// one entry at registration.
    pub trusted_devices: Vec<TrustedDevice>,
}

/// One browser/device authorized to authenticate an account.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrustedDevice {
    /// SHA-256 digest over `(userAgent, screen, salt)`.
    pub fingerprint: String,
    /// Random value mixed into the digest; unique per binding event.
    pub salt: String,
    /// Raw client-reported string, stored for audit only.
    pub user_agent: String,
    /// Raw client-reported string, stored for audit only.
    pub screen: String,
    /// Unix seconds when this device was added to the trust list.
    pub bound_at: i64,
}

/// Client-visible projection of an [`Account`].
///
/// Excludes the password hash, TOTP secret, paraphrase hash, and the trusted
/// device list.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountPublicView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub public_key: String,
}

impl From<&Account> for AccountPublicView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            username: account.username.clone(),
            email: account.email.clone(),
            public_key: account.public_key.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: "a3a8e1a0".to_string(),
            username: "alice42".to_string(),
            email: "alice@gmail.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            totp_secret: "JBSWY3DPEHPK3PXP".to_string(),
            paraphrase_hash: "$argon2id$stub".to_string(),
            public_key: "pk".to_string(),
            trusted_devices: vec![TrustedDevice {
                fingerprint: "f".repeat(64),
                salt: "00ff".to_string(),
                user_agent: "UA-X".to_string(),
                screen: "1920x1080".to_string(),
                bound_at: 1_700_000_000,
            }],
        }
    }

    #[test]
    fn account_serializes_in_camel_case() {
        let value = serde_json::to_value(sample_account()).unwrap();
        assert!(value.get("passwordHash").is_some());
        assert!(value.get("totpSecret").is_some());
        assert!(value.get("paraphraseHash").is_some());
        assert!(value.get("trustedDevices").is_some());
        let device = value
            .get("trustedDevices")
            .and_then(|devices| devices.get(0))
            .unwrap();
        assert!(device.get("userAgent").is_some());
        assert!(device.get("boundAt").is_some());
    }

    #[test]
    fn public_view_omits_secrets() {
        let account = sample_account();
        let view = AccountPublicView::from(&account);
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(
            value.get("email").and_then(serde_json::Value::as_str),
            Some("alice@gmail.com")
        );
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("totpSecret").is_none());
        assert!(value.get("paraphraseHash").is_none());
        assert!(value.get("trustedDevices").is_none());
    }

    #[test]
    fn account_round_trips_through_json() {
        let account = sample_account();
        let json = serde_json::to_string(&account).unwrap();
        let decoded: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.email, account.email);
        assert_eq!(decoded.trusted_devices.len(), 1);
        assert_eq!(decoded.trusted_devices[0].screen, "1920x1080");
    }
}
