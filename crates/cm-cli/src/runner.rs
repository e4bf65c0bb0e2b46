use crate::commands::Commands;
use crate::error::Result as CliResult;

use cm_config::Config;
use cm_session::{FileStore, HttpIdentityClient, SessionManager, SessionSnapshot};

use std::sync::Arc;

use log::debug;

/// Wire a manager to the configured file store and identity service.
pub fn build_manager(config: &Config) -> CliResult<SessionManager> {
    let store = FileStore::open(config.store_path()?)?;
    debug!("Session store at {}", store.path().display());

    let identity =
        HttpIdentityClient::with_timeout(&config.identity.base_url, config.identity.timeout())?;

    Ok(SessionManager::new(Arc::new(store), Arc::new(identity)))
}

/// Execute one command against `manager` and return the resulting snapshot.
///
/// Every command except `logout` first restores whatever session the store
/// holds, so the output reflects the re-validated state.
pub async fn run(command: &Commands, manager: &SessionManager) -> CliResult<SessionSnapshot> {
    match command {
        Commands::Status => {
            manager.bootstrap().await;
        }
        Commands::Login { token, tenant } => {
            manager.bootstrap().await;
            manager.login(token, tenant).await?;
        }
        Commands::Logout => {
            manager.logout();
        }
        Commands::Tenant { id } => {
            manager.bootstrap().await;
            manager.select_tenant(id).await?;
        }
    }

    Ok(manager.snapshot())
}

/// Serialize a snapshot for stdout.
pub fn render(snapshot: &SessionSnapshot, pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    Ok(json)
}
