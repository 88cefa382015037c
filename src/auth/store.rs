//! Account collection store boundary.
//!
//! The core reads the whole collection at entry and writes it back at exit;
//! no indexed update primitive is assumed. [`JsonAccountStore`] is the flat
//! JSON file collaborator; [`MemoryAccountStore`] backs tests and ephemeral
//! runs.

use crate::auth::models::Account;
use anyhow::{anyhow, Context, Result};
use std::{
    fs,
    path::PathBuf,
    sync::RwLock,
};

/// Whole-collection load/save contract for the account set.
pub trait AccountStore: Send + Sync {
    /// Load every account.
    ///
    /// # Errors
    /// Returns an error if the backing collection cannot be read or decoded.
    fn load(&self) -> Result<Vec<Account>>;

    /// Replace the whole collection.
    ///
    /// # Errors
    /// Returns an error if the backing collection cannot be written.
    fn save(&self, accounts: &[Account]) -> Result<()>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl AccountStore for MemoryAccountStore {
    fn load(&self) -> Result<Vec<Account>> {
        self.accounts
            .read()
            .map(|accounts| accounts.clone())
            .map_err(|_| anyhow!("account store lock poisoned"))
    }

    fn save(&self, accounts: &[Account]) -> Result<()> {
        let mut guard = self
            .accounts
            .write()
            .map_err(|_| anyhow!("account store lock poisoned"))?;
        *guard = accounts.to_vec();
        Ok(())
    }
}

/// Flat JSON file holding the account collection.
///
/// A missing or empty file reads as an empty collection; saves rewrite the
/// whole file pretty-printed.
pub struct JsonAccountStore {
    path: PathBuf,
}

impl JsonAccountStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountStore for JsonAccountStore {
    fn load(&self) -> Result<Vec<Account>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path).with_context(|| {
            format!("failed to read account collection: {}", self.path.display())
        })?;

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).with_context(|| {
            format!(
                "failed to decode account collection: {}",
                self.path.display()
            )
        })
    }

    fn save(&self, accounts: &[Account]) -> Result<()> {
        let data = serde_json::to_string_pretty(accounts)?;
        fs::write(&self.path, data).with_context(|| {
            format!(
                "failed to write account collection: {}",
                self.path.display()
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::models::TrustedDevice;
    use uuid::Uuid;

    fn sample_account() -> Account {
        Account {
            id: Uuid::new_v4().to_string(),
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

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("forumweb-{tag}-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryAccountStore::default();
        assert!(store.load().unwrap().is_empty());

        store.save(&[sample_account()]).unwrap();
        let accounts = store.load().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].email, "alice@gmail.com");
    }

    #[test]
    fn json_store_missing_file_reads_empty() {
        let store = JsonAccountStore::new(scratch_path("missing"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn json_store_round_trips() {
        let path = scratch_path("round-trip");
        let store = JsonAccountStore::new(&path);

        store.save(&[sample_account()]).unwrap();
        let accounts = store.load().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].trusted_devices.len(), 1);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn json_store_rejects_corrupt_collection() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonAccountStore::new(&path);
        assert!(store.load().is_err());

        fs::remove_file(path).unwrap();
    }
}
