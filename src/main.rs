use clap::Parser;
use handyman_directory::utils::{logger, validation::Validate};
use handyman_directory::{DirectoryConfig, EtlEngine, LocalStorage, SitemapPipeline, SupabaseClient};

#[derive(Parser, Debug)]
#[command(name = "handyman-directory")]
#[command(about = "Regenerate sitemap.xml from the business directory store")]
struct Args {
    /// Override the sitemap output path (SITEMAP_OUTPUT)
    #[arg(short, long)]
    output: Option<String>,

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

    tracing::info!("Starting sitemap generation");

    let config = match DirectoryConfig::from_env().and_then(|config| {
        let config = match args.output {
            Some(output) => config.with_output_path(output),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("Config: {:?}", config);

    let source = SupabaseClient::new(&config.store_url, &config.api_key);
    let pipeline = SitemapPipeline::new(LocalStorage::new("."), source, config);

    match EtlEngine::new(pipeline).run().await {
        Ok(output_path) => {
            tracing::info!("Sitemap written to {}", output_path);
            println!("✅ Sitemap written to {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Sitemap generation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
