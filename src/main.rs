use clap::Parser;
use donorlink::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "donorlink", about = "Emergency blood request board")]
struct Args {
    /// Fetch emergency requests from this URL
    #[arg(long)]
    feed_url: Option<String>,

    /// Read emergency requests from a JSON file
    #[arg(long, conflicts_with = "feed_url")]
    feed_file: Option<PathBuf>,

    /// Preference store location
    #[arg(long)]
    store: Option<PathBuf>,

    /// Switch to this language after startup (bn, en, hi, kn, ta, te)
    #[arg(long)]
    lang: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to donorlink.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("donorlink.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        eprintln!("donorlink: {e}; using defaults");
        Default::default()
    });
    let cli = CliOverrides {
        feed_url: args.feed_url,
        feed_file: args.feed_file,
        store_path: args.store,
    };
    let resolved = match config::resolve(&file_config, &cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("donorlink: {e}");
            std::process::exit(2);
        }
    };

    log::info!("donorlink starting up with feed {:?}", resolved.feed);

    donorlink::tui::run(resolved, args.lang)
}
