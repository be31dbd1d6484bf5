use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use curio::core::{HostEvent, WidgetHost};
use curio::widgets::Notice;
use curio::Config;

#[derive(Parser)]
#[command(name = "curio")]
#[command(about = "A headless host for interactive widget cores")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "~/.config/curio/curio.toml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("curio={log_level}"))
        .with_target(false)
        .init();

    info!("🦀 Starting Curio v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli.config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("❌ Host error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(config_path: &str) -> Result<()> {
    let config = Config::load(config_path).await?;

    let mut host = WidgetHost::new();
    host.load_widgets(&config).await?;
    if host.get_widget_count() == 0 {
        return Err(anyhow::anyhow!("No widgets loaded"));
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms()));
    let mut last_tick = Instant::now();

    info!("🔄 Starting tick loop");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let delta = now.duration_since(last_tick);
                last_tick = now;

                let notices = host.handle_event(&HostEvent::Tick { delta }).await;
                for (widget, notice) in notices {
                    report(&widget, &notice);
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Received shutdown signal");
                break;
            }
        }
    }

    info!("👋 Curio stopped");
    Ok(())
}

fn report(widget: &str, notice: &Notice) {
    match notice {
        Notice::Tooltip { text } => info!("💬 [{}] {}", widget, text),
        Notice::MoveStarted { tile } => info!("🧩 [{}] tile {} moving", widget, tile),
        Notice::MoveSettled { tile } => info!("🧩 [{}] tile {} settled", widget, tile),
        Notice::Solved => info!("🎉 [{}] puzzle solved", widget),
        Notice::SpinStarted => info!("🎡 [{}] spin started", widget),
        Notice::SpinSettled { label } => info!("🎡 [{}] landed on {}", widget, label),
    }
}
