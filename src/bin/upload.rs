use clap::Parser;
use handyman_directory::utils::{logger, validation::Validate};
use handyman_directory::{DirectoryConfig, EtlEngine, LocalStorage, SupabaseClient, UploadPipeline};

#[derive(Parser)]
#[command(name = "upload")]
#[command(about = "Flatten, deduplicate and upload a scraper export to the store")]
struct Args {
    /// Path to the scraper export (JSON array)
    #[arg(short, long, default_value = "scraper/exports/franklin_handyman_flat.json")]
    input: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    dotenv::from_path(".env.local").ok();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let config = match DirectoryConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let source = SupabaseClient::new(&config.store_url, &config.api_key);
    let pipeline = UploadPipeline::new(LocalStorage::new("."), source, config, args.input.clone());

    match EtlEngine::new(pipeline).run().await {
        Ok(report) => {
            println!("✅ Upload finished: {}", report);
            if report.failed > 0 {
                tracing::warn!("{} rows were rejected by the store", report.failed);
            }
        }
        Err(e) => {
            tracing::error!("Upload of {} failed: {} ({:?})", args.input, e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
