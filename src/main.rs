use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use topodraw::config::EditorConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Draw network topologies of routers, switches and links", long_about = None)]
struct Cli {
    /// JSON file overriding editor settings and colors
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<Utf8PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", default_value = "topodraw=info")]
    log_level: String,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn load_config(path: Option<&Utf8PathBuf>) -> Result<EditorConfig> {
    match path {
        Some(path) => {
            let config = EditorConfig::load(path).inspect_err(|e| warn!(%path, "config rejected: {e:#}"))?;
            info!(%path, "config loaded");
            Ok(config)
        }
        None => Ok(EditorConfig::default()),
    }
}

#[cfg(feature = "egui")]
fn main() -> Result<()> {
    use eframe::egui;
    use topodraw::egui_app::TopologyApp;

    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let config = load_config(cli.config.as_ref())?;

    println!("Keyboard shortcuts:");
    println!("  R        — Router placement mode");
    println!("  S        — Switch placement mode");
    println!("  N        — Connect (neutral) mode");
    println!("  C        — Clear topology");
    println!("  Delete   — Delete selection");
    println!("  Escape   — Cancel and clear selection");
    println!("  Arrows   — Walk to the next neighbor");
    println!("  Wheel    — Zoom, right-drag to pan");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };
    eframe::run_native(
        "topodraw",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(TopologyApp::new(config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

#[cfg(not(feature = "egui"))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    load_config(cli.config.as_ref())?;
    eprintln!("topodraw was built without the 'egui' feature. Try: cargo run --features egui");
    Ok(())
}
