// Operator console for in-store claim redemption.
use std::io::{stdout, Write};
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use claimdesk_common::models::ApiCredential;
use claimdesk_core::history::HistoryBrowser;
use claimdesk_core::{RedemptionClient, RedemptionSession};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "claimdesk", about = "Verify and redeem customer offer claims")]
struct Args {
    /// Marketplace API base URL.
    #[arg(long, default_value = "http://localhost:8001/api/v1")]
    api_url: String,

    /// Bearer token; falls back to CLAIMDESK_API_TOKEN.
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let token = args
        .token
        .or_else(|| std::env::var("CLAIMDESK_API_TOKEN").ok())
        .unwrap_or_default();

    println!("ClaimDesk operator console");
    if token.trim().is_empty() {
        println!(
            "{}",
            "⚠ No bearer token configured (set CLAIMDESK_API_TOKEN or --token); \
             every call will require authentication first."
                .yellow()
        );
    }

    let client = Arc::new(RedemptionClient::new(
        &args.api_url,
        ApiCredential::new(token),
    )?);
    let mut session = RedemptionSession::new(client.clone());
    let mut browser = HistoryBrowser::new(client);

    println!("Connected to {}", args.api_url);
    println!("\nType 'help' for available commands.\n");

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", format!("[{}]>", session.phase().name()).bold());
        stdout().flush()?;

        let line = match reader.next_line().await? {
            Some(line) => line.trim().to_string(),
            None => break, // EOF
        };
        if line.is_empty() {
            continue;
        }

        if commands::dispatch(&line, &mut session, &mut browser).await {
            break;
        }
    }

    println!("Goodbye.");
    Ok(())
}
