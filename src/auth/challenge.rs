//! Challenge acknowledgment verification.
//!
//! The final gate of the login state machine. The shipped verifier accepts a
//! single literal the client echoes after confirming it stored its recovery
//! material; a real challenge-response scheme can replace the verifier
//! without touching the login flow's shape.

/// Literal the current client sends as its challenge acknowledgment.
pub const ACCEPTED_CHALLENGE: &str = "recovery-material-saved";

/// Decides whether a submitted challenge response passes the final login gate.
pub trait ChallengeVerifier: Send + Sync {
    fn verify(&self, response: &str) -> bool;
}

/// Accepts exactly one configured literal.
#[derive(Clone, Debug)]
pub struct StaticChallengeVerifier {
    accepted: String,
}

impl StaticChallengeVerifier {
    #[must_use]
    pub fn new(accepted: impl Into<String>) -> Self {
        Self {
            accepted: accepted.into(),
        }
    }
}

impl Default for StaticChallengeVerifier {
    fn default() -> Self {
        Self::new(ACCEPTED_CHALLENGE)
    }
}

impl ChallengeVerifier for StaticChallengeVerifier {
    fn verify(&self, response: &str) -> bool {
        response == self.accepted
    }
}
