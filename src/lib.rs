//! checkdesk library root.
//! Exposes the CLI parser, the high-level run() function, and the client
//! modules (API wrapper, session store, scanner controller, card renderer).

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

use api::ApiClient;
use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use session::{Session, SessionStore};
use tracing::warn;

/// What every command handler gets: the resolved configuration and the
/// session store.
pub struct AppContext {
    pub cfg: Config,
    pub store: SessionStore,
}

impl AppContext {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            store: SessionStore::new(Config::session_file()),
        }
    }

    /// Client without credentials (login, register).
    pub fn client(&self) -> AppResult<ApiClient> {
        ApiClient::from_config(&self.cfg)
    }

    /// Client carrying the stored session. Fails when nobody is logged in
    /// or the token has expired.
    pub fn authed(&self) -> AppResult<(ApiClient, Session)> {
        let session = self.store.require()?;
        let client = self.client()?.with_session(&session);
        Ok((client, session))
    }
}

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    match &cli.command {
        Commands::Init { force } => commands::init::handle(*force),
        Commands::Config { .. } => commands::config::handle(&cli.command, &ctx.cfg),
        Commands::Login { .. }
        | Commands::Register { .. }
        | Commands::Logout
        | Commands::Whoami => commands::auth::handle(&cli.command, ctx).await,
        Commands::Members { action } => commands::members::handle(action, ctx).await,
        Commands::Attendance { action } => commands::attendance::handle(action, ctx).await,
        Commands::Overview => commands::overview::handle(ctx).await,
        Commands::Analytics { period, page } => {
            commands::analytics::handle(*period, *page, ctx).await
        }
        Commands::Reports { .. } => commands::reports::handle(&cli.command, ctx).await,
        Commands::Scan { mode } => commands::scan::handle(*mode, ctx).await,
        Commands::Settings { action } => commands::settings::handle(action, ctx).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    logging::init();

    let cli = Cli::parse();

    // config is loaded once; --api-url beats env and file
    let mut cfg = Config::load()?;
    if let Some(url) = &cli.api_url {
        cfg.api_url = url.clone();
    }

    let ctx = AppContext::new(cfg);
    let anonymous = matches!(cli.command, Commands::Login { .. } | Commands::Register { .. });

    match dispatch(&cli, &ctx).await {
        // the server rejected our token: drop it so the next run asks for a login
        Err(AppError::Api { status: 401, .. }) if !anonymous && ctx.store.path().exists() => {
            warn!("token rejected by server, clearing session");
            ctx.store.clear()?;
            Err(AppError::SessionExpired)
        }
        other => other,
    }
}
