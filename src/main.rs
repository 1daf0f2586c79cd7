use book_scraper::sink::{JsonLinesSink, RowSink, SheetsSink};
use book_scraper::{BookScraper, EXIT_PREFLIGHT_FAILED, ScraperConfig};
use clap::Parser;
use std::process;

mod args;
use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging, showing per-page progress unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                process::exit(EXIT_PREFLIGHT_FAILED);
            }
        },
        None => ScraperConfig::default(),
    };
    let config = args.apply(config.apply_env());

    // The sink must be reachable before any page is scraped
    let mut sink: Box<dyn RowSink> = if args.dry_run {
        Box::new(JsonLinesSink::new(std::io::stdout()))
    } else {
        match SheetsSink::connect(&config.sink).await {
            Ok(sink) => Box::new(sink),
            Err(e) => {
                ::log::error!("Error connecting to Google Sheets: {}", e);
                process::exit(EXIT_PREFLIGHT_FAILED);
            }
        }
    };

    let code = BookScraper::new(config).run_into(sink.as_mut()).await;
    process::exit(code);
}
