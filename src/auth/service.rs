//! Registration, login, and bind-device flows.
//!
//! Every operation is request-scoped: it re-reads the account collection
//! through the store boundary and, when mutating, writes the whole collection
//! back. Read-modify-write cycles serialize through a service-level lock so
//! two concurrent mutations cannot clobber each other's appended records.

use crate::auth::{
    challenge::ChallengeVerifier,
    credentials,
    devices::{self, DeviceBinding},
    models::{Account, AccountPublicView, TrustedDevice},
    now_unix_seconds,
    store::AccountStore,
    totp, AuthError,
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Only this provider is accepted at registration.
const ALLOWED_EMAIL_PATTERN: &str = r"(?i)^[^@\s]+@gmail\.com$";

/// One-time setup material returned by registration.
///
/// The paraphrase and TOTP secret are disclosed here and never again; only
/// one-way forms are stored.
#[derive(Debug)]
pub struct RegistrationOutput {
    pub account_id: String,
    pub username: String,
    pub email: String,
    pub totp_secret: String,
    pub totp_provisioning_uri: String,
    pub totp_provisioning_image: String,
    pub fingerprint: String,
    pub salt: String,
    pub recovery_paraphrase: String,
}

/// Result of authorizing an additional device.
#[derive(Debug)]
pub struct BindDeviceOutput {
    pub fingerprint: String,
    pub trusted_devices: Vec<TrustedDevice>,
}

/// Orchestrates the credential generator, TOTP engine, device trust list, and
/// account store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    challenge: Arc<dyn ChallengeVerifier>,
    write_lock: Arc<Mutex<()>>,
}

impl AuthService {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, challenge: Arc<dyn ChallengeVerifier>) -> Self {
        Self {
            store,
            challenge,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Register a new account and seed its first trusted device.
    ///
    /// Validation order: non-empty fields, allowed email domain, unused
    /// email. Persistence is a single whole-collection save; if it fails, no
    /// account exists.
    ///
    /// # Errors
    /// `MissingField`, `DomainNotAllowed`, `EmailInUse`, or `Internal` on a
    /// store or crypto failure.
    #[instrument(skip_all, fields(username = %username, email = %email))]
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        user_agent: &str,
        screen: &str,
    ) -> Result<RegistrationOutput, AuthError> {
        require_field("username", username)?;
        require_field("email", email)?;
        require_field("password", password.expose_secret())?;
        require_field("userAgent", user_agent)?;
        require_field("screen", screen)?;

        if !allowed_email(email) {
            return Err(AuthError::DomainNotAllowed);
        }

        let _guard = self.lock_writes();

        let mut accounts = self.store.load()?;
        if accounts.iter().any(|account| account.email == email) {
            return Err(AuthError::EmailInUse);
        }

        let paraphrase = credentials::generate_paraphrase();
        let paraphrase_hash = credentials::hash_paraphrase(&paraphrase)?;
        let salt = credentials::generate_salt();
        let fingerprint = credentials::device_fingerprint(user_agent, screen, &salt);
        let enrollment = totp::enroll(email)?;
        let keypair = credentials::generate_keypair();
        let password_hash = credentials::hash_password(password.expose_secret())?;

        let account = Account {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            totp_secret: enrollment.secret.clone(),
            paraphrase_hash,
            public_key: keypair.public_key,
            trusted_devices: vec![TrustedDevice {
                fingerprint: fingerprint.clone(),
                salt: salt.clone(),
                user_agent: user_agent.to_string(),
                screen: screen.to_string(),
                bound_at: now_unix_seconds(),
            }],
        };

        let account_id = account.id.clone();
        accounts.push(account);
        self.store.save(&accounts)?;

        info!(account_id = %account_id, "account registered");

        Ok(RegistrationOutput {
            account_id,
            username: username.to_string(),
            email: email.to_string(),
            totp_secret: enrollment.secret,
            totp_provisioning_uri: enrollment.provisioning_uri,
            totp_provisioning_image: enrollment.provisioning_image,
            fingerprint,
            salt,
            recovery_paraphrase: paraphrase,
        })
    }

    /// Run the login state machine: credentials, device trust, TOTP code,
    /// challenge acknowledgment. Gates run strictly in that order and each
    /// failure is terminal.
    ///
    /// Unknown email and wrong password collapse into one
    /// `InvalidCredentials` outcome; the later gates keep distinct kinds.
    ///
    /// # Errors
    /// `InvalidCredentials`, `UntrustedDevice`, `InvalidCode`,
    /// `ChallengeRejected`, or `Internal` on a store failure.
    #[instrument(skip_all, fields(email = %email))]
    pub fn login(
        &self,
        email: &str,
        password: &SecretString,
        fingerprint: &str,
        totp_code: &str,
        challenge_response: &str,
    ) -> Result<AccountPublicView, AuthError> {
        let accounts = self.store.load()?;

        let Some(account) = accounts.iter().find(|account| account.email == email) else {
            return Err(AuthError::InvalidCredentials);
        };

        if !credentials::verify_password(password.expose_secret(), &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if !devices::is_trusted(account, fingerprint) {
            return Err(AuthError::UntrustedDevice);
        }

        if !totp::verify(&account.totp_secret, totp_code) {
            return Err(AuthError::InvalidCode);
        }

        if !self.challenge.verify(challenge_response) {
            return Err(AuthError::ChallengeRejected);
        }

        info!(account_id = %account.id, "login authorized");

        Ok(AccountPublicView::from(account))
    }

    /// Authorize an additional device using the recovery paraphrase.
    ///
    /// # Errors
    /// `MissingField`, `AccountNotFound`, `ParaphraseIncorrect`,
    /// `DeviceAlreadyBound`, or `Internal` on a store failure.
    #[instrument(skip_all, fields(email = %email))]
    pub fn bind_device(
        &self,
        email: &str,
        paraphrase: &SecretString,
        user_agent: &str,
        screen: &str,
    ) -> Result<BindDeviceOutput, AuthError> {
        require_field("email", email)?;
        require_field("paraphrase", paraphrase.expose_secret())?;
        require_field("userAgent", user_agent)?;
        require_field("screen", screen)?;

        let _guard = self.lock_writes();

        let mut accounts = self.store.load()?;

        let Some(account) = accounts
            .iter_mut()
            .find(|account| account.email == email)
        else {
            // The email-first check makes "unknown email" distinguishable
            // from "wrong paraphrase" by error kind; a known hardening gap.
            return Err(AuthError::AccountNotFound);
        };

        if !credentials::verify_paraphrase(paraphrase.expose_secret(), &account.paraphrase_hash) {
            return Err(AuthError::ParaphraseIncorrect);
        }

        let salt = credentials::generate_salt();
        let fingerprint = credentials::device_fingerprint(user_agent, screen, &salt);

        devices::bind(
            account,
            DeviceBinding {
                fingerprint: fingerprint.clone(),
                salt,
                user_agent: user_agent.to_string(),
                screen: screen.to_string(),
            },
        )?;

        let account_id = account.id.clone();
        let trusted_devices = account.trusted_devices.clone();

        self.store.save(&accounts)?;

        info!(
            account_id = %account_id,
            devices = trusted_devices.len(),
            "device bound"
        );

        Ok(BindDeviceOutput {
            fingerprint,
            trusted_devices,
        })
    }

    /// Number of registered accounts; used by the health endpoint to probe
    /// the store.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be loaded.
    pub fn account_count(&self) -> Result<usize, AuthError> {
        let accounts = self.store.load()?;
        debug!(accounts = accounts.len(), "account collection loaded");
        Ok(accounts.len())
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn require_field(name: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(name));
    }
    Ok(())
}

/// Lightweight domain gate used before persisting registration data.
fn allowed_email(email: &str) -> bool {
    Regex::new(ALLOWED_EMAIL_PATTERN).is_ok_and(|regex| regex.is_match(email))
}
