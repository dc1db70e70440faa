//! Parlor TUI Entry Point
//!
//! Launches the terminal persona chat.
//!
//! Usage:
//!   parlor [OPTIONS]
//!
//! Logs go to `$PARLOR_LOG`, or `parlor/parlor.log` under the local data
//! directory, because the UI owns the terminal. Filter with `RUST_LOG`.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parlor_core::{
    load_config_from_path, Conductor, ConductorConfig, ConfigOverrides, ParlorConfig,
    RandomSelector, Route, SystemScheduler,
};
use parlor_tui::App;

/// Parlor - chat with AI companions in your terminal
#[derive(Parser, Debug)]
#[command(name = "parlor")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (default: ~/.config/parlor/parlor.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Simulated typing delay before a persona replies
    #[arg(long, value_name = "MS")]
    reply_delay_ms: Option<u64>,

    /// How long a chosen card stays highlighted before the chat opens
    #[arg(long, value_name = "MS")]
    selection_delay_ms: Option<u64>,

    /// Persona whose replies stand in for an empty pool
    #[arg(long, value_name = "ID")]
    fallback_persona: Option<String>,

    /// Open this address on start (`/` or `/chat/<id>`)
    #[arg(long, value_name = "PATH", conflicts_with = "persona")]
    route: Option<String>,

    /// Open a chat with this persona on start
    #[arg(short, long, value_name = "ID")]
    persona: Option<String>,

    /// Seed reply selection for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ms) = self.reply_delay_ms {
            overrides = overrides.with_reply_delay_ms(ms);
        }
        if let Some(ms) = self.selection_delay_ms {
            overrides = overrides.with_selection_delay_ms(ms);
        }
        if let Some(ref id) = self.fallback_persona {
            overrides = overrides.with_fallback_persona(id.clone());
        }
        if let Some(ref path) = self.route {
            overrides = overrides.with_initial_route(Route::parse(path));
        }
        if let Some(ref id) = self.persona {
            overrides = overrides.with_initial_route(Route::Chat(id.as_str().into()));
        }
        if let Some(seed) = self.seed {
            overrides = overrides.with_seed(seed);
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_path = init_logging(args.debug)?;
    tracing::info!(log = %log_path.display(), "Parlor starting");

    let config = load(&args)?;
    let conductor = build_conductor(&config)?;

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: parlor requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH ran without -t.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let mut app = App::new(conductor);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("Parlor stopped");

    // Propagate any errors
    result
}

/// Merge file, environment and command line into one configuration
fn load(args: &Args) -> anyhow::Result<ParlorConfig> {
    let path = args
        .config
        .clone()
        .or_else(parlor_core::default_config_path);
    let mut config = load_config_from_path(path).context("Failed to load configuration")?;

    args.overrides().apply(&mut config);
    config.validate()?;

    tracing::info!(
        source = %config.source(),
        reply_delay_ms = u64::try_from(config.reply_delay.as_millis()).unwrap_or(u64::MAX),
        personas = config.personas.len(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Wire the roster, timers and reply selection into a conductor
fn build_conductor(
    config: &ParlorConfig,
) -> anyhow::Result<Conductor<SystemScheduler, RandomSelector>> {
    let registry = config
        .build_registry()
        .context("Failed to build persona roster")?;
    let selector = match config.seed {
        Some(seed) => RandomSelector::seeded(seed),
        None => RandomSelector::new(),
    };

    let mut conductor = Conductor::new(
        Arc::new(registry),
        ConductorConfig::from(config),
        SystemScheduler::new(),
        selector,
    );
    if config.initial_route != Route::Selection {
        conductor.navigate(config.initial_route.clone());
    }
    Ok(conductor)
}

/// Send logs to a file; the terminal belongs to the UI
fn init_logging(debug: bool) -> anyhow::Result<PathBuf> {
    let path = std::env::var_os("PARLOR_LOG")
        .map(PathBuf::from)
        .or_else(|| dirs::data_local_dir().map(|d| d.join("parlor").join("parlor.log")))
        .unwrap_or_else(|| std::env::temp_dir().join("parlor.log"));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let default_filter = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(path)
}
