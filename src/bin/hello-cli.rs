use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hello-cli")]
#[command(about = "Smoke-check CLI for a running hello-api instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call the unversioned health check
    Health,
    /// Call the versioned health check
    Version,
    /// Request a greeting
    Hello {
        /// Name to greet; the server defaults to "World"
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Health => client.get(format!("{base}/health")),
        Commands::Version => client.get(format!("{base}/api/v1/health")),
        Commands::Hello { name } => {
            let request = client.get(format!("{base}/api/v1/hello"));
            match name {
                Some(name) => request.query(&[("name", name)]),
                None => request,
            }
        }
    };

    print_response(request.send().await?).await
}

/// Print status, request ID and body. Returns whether the status was 2xx.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let request_id = res
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let text = res.text().await?;

    let body = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("Error: API returned status {status} (request id {request_id})");
        eprintln!("{body}");
        return Ok(false);
    }

    println!("Status: {status}");
    println!("Request ID: {request_id}");
    println!("{body}");
    Ok(true)
}
