//! Device trust list operations.
//!
//! The trusted-device list is the authoritative record of devices permitted
//! to authenticate an account. Binding registers a *new* device; reasserting
//! an existing fingerprint is a conflict. No removal or expiry exists.

use crate::auth::{
    models::{Account, TrustedDevice},
    now_unix_seconds, AuthError,
};

/// Everything needed to append one device to an account's trust list.
#[derive(Debug)]
pub struct DeviceBinding {
    pub fingerprint: String,
    pub salt: String,
    pub user_agent: String,
    pub screen: String,
}

/// True iff some trusted device matches `fingerprint` exactly.
#[must_use]
pub fn is_trusted(account: &Account, fingerprint: &str) -> bool {
    account
        .trusted_devices
        .iter()
        .any(|device| device.fingerprint == fingerprint)
}

/// Append a new trusted device stamped with the current time.
///
/// # Errors
/// Returns [`AuthError::DeviceAlreadyBound`] if the fingerprint is already
/// in the trust list.
pub fn bind(account: &mut Account, binding: DeviceBinding) -> Result<(), AuthError> {
    if is_trusted(account, &binding.fingerprint) {
        return Err(AuthError::DeviceAlreadyBound);
    }

    account.trusted_devices.push(TrustedDevice {
        fingerprint: binding.fingerprint,
        salt: binding.salt,
        user_agent: binding.user_agent,
        screen: binding.screen,
        bound_at: now_unix_seconds(),
    });

    Ok(())
}
