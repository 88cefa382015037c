//! Error taxonomy for the authentication core.
//!
//! Every failure is terminal for the current request; nothing is retried
//! internally. The HTTP layer owns the mapping from kind to status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// A required input was empty or absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// The registration email is not from the accepted provider.
    #[error("domain not allowed")]
    DomainNotAllowed,
    /// The registration email already belongs to an account.
    #[error("email in use")]
    EmailInUse,
    /// The fingerprint is already in the account's trust list.
    #[error("device already bound")]
    DeviceAlreadyBound,
    /// No account matches the given email.
    #[error("no matching account")]
    AccountNotFound,
    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Paraphrase proof-of-possession failed.
    #[error("paraphrase incorrect")]
    ParaphraseIncorrect,
    /// The fingerprint is not in the account's trust list.
    #[error("untrusted device")]
    UntrustedDevice,
    /// The TOTP code matched no step in the accepted drift window.
    #[error("invalid code")]
    InvalidCode,
    /// The challenge acknowledgment was not accepted.
    #[error("challenge rejected")]
    ChallengeRejected,
    /// Store or crypto failure unrelated to the client's input.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
