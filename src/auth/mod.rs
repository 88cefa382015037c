//! Device-binding authentication core.
//!
//! Flow Overview:
//! 1) Registration issues a TOTP secret, a recovery paraphrase, and binds the
//!    first device fingerprint, returning the one-time setup material.
//! 2) Login validates password, device trust, TOTP code, and a challenge
//!    acknowledgment, strictly in that order.
//! 3) Bind-device appends an additional trusted device, gated only by
//!    proof-of-possession of the paraphrase.
//!
//! Security boundaries:
//! - Passwords and paraphrases are stored as Argon2id PHC strings only.
//! - The TOTP secret and paraphrase are disclosed once, at registration.
//! - Device fingerprints are salted per binding event; the salt is drawn
//!   fresh every time, so fingerprints never replay across bindings.

pub mod challenge;
pub mod credentials;
pub mod devices;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod totp;

pub use error::AuthError;
pub use service::AuthService;

use std::time::SystemTime;

/// Unix seconds for device-binding timestamps.
pub(crate) fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
