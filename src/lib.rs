//! # ForumWeb Auth (Device-Binding Authentication Core)
//!
//! `forumweb-auth` is the authentication authority for the ForumWeb forum.
//! It implements a multi-factor, device-binding login model:
//!
//! - **Registration** issues a TOTP shared secret (with a scannable
//!   provisioning QR), a short recovery paraphrase, and binds the first
//!   trusted device fingerprint. The paraphrase and TOTP secret are disclosed
//!   exactly once; only one-way forms are stored.
//! - **Login** is a strictly ordered state machine: password, trusted-device
//!   fingerprint, TOTP code, and a challenge acknowledgment must all pass
//!   before the account's public view is returned.
//! - **Bind-device** authorizes an additional device for an existing account,
//!   gated only by proof-of-possession of the recovery paraphrase.
//!
//! ## Storage model
//!
//! The flow is request-scoped and stateless between requests: every operation
//! re-reads the whole account collection through the [`auth::store`] boundary
//! and, if mutating, writes it back. Mutations serialize through the service
//! so concurrent bindings cannot clobber each other.
//!
//! ## Security boundaries
//!
//! - Passwords and paraphrases are Argon2id-hashed; plaintext never persists.
//! - A device fingerprint is only meaningful together with the salt drawn at
//!   binding time; re-binding the same browser yields a new fingerprint.
//! - Unknown email and wrong password collapse into one login failure to
//!   prevent account enumeration.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
