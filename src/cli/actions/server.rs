use crate::{
    api,
    auth::{
        challenge::StaticChallengeVerifier,
        store::{AccountStore, JsonAccountStore},
        AuthService,
    },
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub accounts_path: String,
    pub frontend_origin: Option<String>,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the account collection cannot be read or the server
/// fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let store = Arc::new(JsonAccountStore::new(&args.accounts_path));

    // Fail fast on an unreadable or corrupt collection instead of at the
    // first request.
    let accounts = store
        .load()
        .with_context(|| format!("Failed to open account collection: {}", args.accounts_path))?;

    info!(
        path = %args.accounts_path,
        accounts = accounts.len(),
        "account store ready"
    );

    let service = AuthService::new(store, Arc::new(StaticChallengeVerifier::default()));

    api::serve(args.port, service, args.frontend_origin.as_deref()).await
}
