use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mediaseq_api::{AppState, RestApi};
use mediaseq_core::ImageStore;

/// A small local media browser with sequential image similarity
#[derive(Parser, Debug)]
#[command(name = "mediaseq")]
#[command(about = "Browse and stream a local media directory", long_about = None)]
struct Args {
    /// Directory containing the media folders to serve
    #[arg(short, long, default_value = "./media")]
    media_dir: PathBuf,

    /// HTTP port
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if !args.media_dir.is_dir() {
        anyhow::bail!("media directory {:?} does not exist", args.media_dir);
    }

    info!("Starting mediaseq v{}", env!("CARGO_PKG_VERSION"));
    info!("Media directory: {:?}", args.media_dir);
    info!("HTTP port: {}", args.port);

    let state = Arc::new(AppState {
        store: Arc::new(ImageStore::new()),
        media_root: args.media_dir,
    });

    let sys = actix_web::rt::System::new();
    sys.block_on(async {
        info!("HTTP API: http://localhost:{}/", args.port);
        RestApi::start(state, args.port).await
    })?;

    info!("Shutting down...");
    Ok(())
}
