//! Vantage CLI entrypoint.
//!
//! Composition root of the viewer: loads configuration, parses the deep
//! link once, constructs the concrete boundary services, wires them into
//! the session controller, and runs the terminal UI.

mod app;
mod ui;
mod viewport;

use anyhow::Context;
use app::App;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use vantage_application::DeepLinkProcessor;
use vantage_application::diagnostics::spawn_selection_logger;
use vantage_application::locator::ModelLocator;
use vantage_application::session::{SessionController, SessionOptions};
use vantage_core::deeplink::DeepLinkParams;
use vantage_core::services::IdentityProvider;
use vantage_core::state::StateRepository;
use vantage_infrastructure::paths::VantagePaths;
use vantage_infrastructure::{
    ConfigService, HttpIdentityClient, HttpModelHostClient, HttpRegistryClient,
    RemoteConnectionService, TokenProvider, TomlStateRepository,
};
use viewport::TuiViewport;

/// Vantage - a read-only viewer for remotely hosted infrastructure models.
#[derive(Parser, Debug)]
#[command(name = "vantage", version, about)]
struct Cli {
    /// Deep link: a launch URL whose query can pre-select a project and
    /// model (`projectName`, `imodelName`) and highlight elements
    /// (`elementIds`, space-separated).
    #[arg(long)]
    url: Option<String>,

    /// Path of the configuration file (defaults to the platform config
    /// directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter written to the log file (e.g. `info`, `vantage=debug`).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli.log_level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vantage starting");

    let config_service = match &cli.config {
        Some(path) => ConfigService::new(path.clone()),
        None => ConfigService::from_default_location()?,
    };
    let config = config_service.get_config()?;

    // The deep link is parsed exactly once, here.
    let params = match &cli.url {
        Some(url) => DeepLinkParams::parse(url)?,
        None => DeepLinkParams::empty(),
    };
    let launched_at_redirect = cli
        .url
        .as_deref()
        .is_some_and(|url| url.starts_with(&config.identity.redirect_url));

    // Composition root: every boundary service is constructed here and
    // injected; nothing below reaches for ambient globals.
    let identity = Arc::new(HttpIdentityClient::new(&config.identity));
    let token: Arc<dyn TokenProvider> = identity.clone();
    let registry = Arc::new(HttpRegistryClient::new(
        config.registry.base_url.clone(),
        token.clone(),
    ));
    let model_host = Arc::new(HttpModelHostClient::new(
        config.connection.base_url.clone(),
        token.clone(),
    ));
    let connections = Arc::new(RemoteConnectionService::new(
        config.connection.base_url.clone(),
        token,
    ));
    let locator = ModelLocator::new(registry, model_host, connections);
    let state_repository = Arc::new(TomlStateRepository::from_default_location()?);

    let controller = Arc::new(SessionController::new(
        identity.clone() as Arc<dyn IdentityProvider>,
        locator,
        state_repository.clone() as Arc<dyn StateRepository>,
        SessionOptions {
            sign_in_timeout: Duration::from_secs(config.identity.sign_in_timeout_secs),
            launched_at_redirect,
        },
    ));
    controller.spawn_auth_listener();

    let lifecycle = CancellationToken::new();
    let viewport = Arc::new(TuiViewport::new());
    spawn_selection_logger(viewport.clone(), lifecycle.child_token());

    let deeplink = Arc::new(DeepLinkProcessor::new(&params));

    // Prefill the open-model form: deep link first, then the last session.
    let auto_open = params.project_name().is_some() && params.model_name().is_some();
    let (project_input, model_input) = match (params.project_name(), params.model_name()) {
        (Some(project), Some(model)) => (project.to_string(), model.to_string()),
        _ => {
            let state = state_repository.load().await.unwrap_or_default();
            match state.last_selection() {
                Some((project, model)) => (project.to_string(), model.to_string()),
                None => (String::new(), String::new()),
            }
        }
    };

    let app = App::new(
        controller,
        viewport,
        deeplink,
        lifecycle,
        project_input,
        model_input,
        auto_open,
    );

    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;
    result
}

fn init_tracing(filter: &str) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = VantagePaths::config_dir()
        .context("resolving log directory")?
        .join("logs");
    std::fs::create_dir_all(&logs_dir)?;

    let appender = tracing_appender::rolling::daily(logs_dir, "vantage.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
