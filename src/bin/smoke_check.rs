use clap::Parser;
use handyman_directory::core::smoke::{run_smoke_check, SmokeOutcome};
use handyman_directory::utils::logger;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "smoke-check")]
#[command(about = "Check store settings and connectivity before an upload")]
struct Args {
    /// Request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn first_set(names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    dotenv::from_path(".env.local").ok();
    logger::init_cli_logger(args.verbose);

    // Settings are read raw: absence is an outcome here, not a config error.
    let store_url = first_set(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]);
    let service_key = first_set(&["SUPABASE_SERVICE_ROLE_KEY"]);
    let api_key = if service_key.is_empty() {
        first_set(&["SUPABASE_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"])
    } else {
        service_key.clone()
    };

    let mode = match (service_key.is_empty(), api_key.is_empty()) {
        (false, _) => "SERVICE",
        (true, false) => "ANON",
        (true, true) => "MISSING",
    };
    tracing::info!("Auth mode (expected SERVICE in CI): {}", mode);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Could not build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = run_smoke_check(&client, &store_url, &api_key).await;
    match &outcome {
        SmokeOutcome::Ok { pin_rank_supported } => {
            tracing::info!("pin_rank supported: {}", pin_rank_supported);
            println!("SMOKE_OK");
        }
        SmokeOutcome::MissingUrl => {
            eprintln!("❌ Store base URL is missing or not http(s)");
        }
        SmokeOutcome::MissingKey => {
            eprintln!("❌ No API key found (neither service role nor anon key)");
        }
        SmokeOutcome::AuthRejected { status } => {
            eprintln!("❌ Auth rejected (HTTP {}). Check keys and roles.", status);
        }
        SmokeOutcome::Unexpected { status, body } => {
            eprintln!("❌ Unexpected response (HTTP {}): {}", status, body);
        }
        SmokeOutcome::RequestFailed { message } => {
            eprintln!("❌ Network/request error: {}", message);
        }
    }

    std::process::exit(outcome.exit_code());
}
