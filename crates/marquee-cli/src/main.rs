//! Marquee - a tilted, endlessly scrolling card lane in the terminal
//!
//! Drag the lane with the mouse, nudge it with the wheel, and let autoplay
//! carry it the rest of the way.

use anyhow::Result;
use clap::{Parser, Subcommand};

use marquee_core::paths;

mod settings;
mod tui;

use settings::Overrides;

/// Marquee - infinite scroll lane
#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Tilted, auto-scrolling infinite lane for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the scrolling lane (default)
    Run,

    /// Print the effective configuration as TOML
    Config,

    /// Print the default config file location
    ConfigPath,
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        event::{DisableFocusChange, DisableMouseCapture},
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(
        std::io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    );
}

/// Log to a file so output never lands on the TUI
fn init_logging() {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let log_file = match std::fs::File::create(log_dir.join("marquee.log"))
        .or_else(|_| std::fs::File::create(null_device))
    {
        Ok(file) => file,
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ConfigPath) => {
            println!("{}", cli.overrides.config_path().display());
        }
        Some(Commands::Config) => {
            let config = cli.overrides.resolve()?;
            print!("{}", config.to_toml_string()?);
        }
        Some(Commands::Run) | None => {
            let config = cli.overrides.resolve()?;
            tracing::info!(
                config = %cli.overrides.config_path().display(),
                autoplay = config.engine.autoplay,
                "Starting Marquee"
            );
            let mut app = tui::App::new(config);
            app.run().await?;
        }
    }

    Ok(())
}
