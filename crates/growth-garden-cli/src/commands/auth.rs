use clap::Subcommand;
use growth_garden_core::session::TOKEN_ENV_VAR;
use growth_garden_core::storage::SessionStore;
use growth_garden_core::{ApiClient, ApiError, Config, ResourceCache, Session};

use super::{block_on, session, CliResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Password (falls back to GROWTH_GARDEN_PASSWORD)
        #[arg(long, env = "GROWTH_GARDEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user
    Status,
}

pub fn run(action: AuthAction) -> CliResult {
    let config = Config::load_or_default();
    let store = SessionStore::open()?;

    match action {
        AuthAction::Login { email, password } => {
            let mut client = ApiClient::with_cache(Session::from_config(&config), ResourceCache::disabled())?;
            let auth = block_on(client.login(&email, &password))??;
            store.save(&auth.token, Some(auth.user.clone()))?;
            println!("Signed in as {}", auth.user.email);
        }
        AuthAction::Logout => {
            let session = session(&config)?;
            if session.is_authenticated() {
                let mut client = ApiClient::with_cache(session, ResourceCache::disabled())?;
                if let Err(e) = block_on(client.logout())? {
                    tracing::warn!(error = %e, "server logout failed, clearing local session anyway");
                }
            }
            store.clear()?;
            println!("Signed out");
        }
        AuthAction::Status => {
            let session = session(&config)?;
            if !session.is_authenticated() {
                println!("Not signed in");
                return Ok(());
            }
            let client = ApiClient::with_cache(session, ResourceCache::disabled())?;
            match block_on(client.current_user())? {
                Ok(user) => {
                    let source = if std::env::var(TOKEN_ENV_VAR).is_ok() {
                        " (token from environment)"
                    } else {
                        ""
                    };
                    println!("Signed in as {}{source}", user.email);
                }
                Err(ApiError::Unauthorized) => println!("Stored token was rejected; sign in again"),
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
