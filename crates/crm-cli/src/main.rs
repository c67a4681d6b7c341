//! crm - a command-line client for the CRM backend.
//!
//! Logs in against the REST API, persists the token pair under the user
//! config directory, and lists leads and clients. Renewal of an expired
//! access token is handled transparently by `crm-core`; when the session
//! becomes unrecoverable the stored tokens are wiped and the next command
//! will ask for a fresh login.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crm_core::api::{ApiClient, ListParams};
use crm_core::auth::FileTokenStore;
use crm_core::config::ApiConfig;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    println!("Usage: crm <command>");
    println!();
    println!("Commands:");
    println!("  login <email>   Authenticate and store the session tokens");
    println!("  logout          Wipe the stored session tokens");
    println!("  whoami          Show the logged-in user's profile");
    println!("  leads           List leads");
    println!("  clients         List clients");
    println!();
    println!("Environment:");
    println!("  CRM_API_BASE_URL   API base URL (default http://127.0.0.1:8000/api/)");
    println!("  RUST_LOG           Log filter (default warn)");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("crm cli starting");

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    let store = Arc::new(FileTokenStore::open_default()?);
    let client = ApiClient::new(ApiConfig::default(), store)?;

    match command {
        "login" => {
            let email = args
                .get(2)
                .context("usage: crm login <email>")?;
            let password = rpassword::prompt_password("Password: ")?;
            client.login(email, &password).await?;
            println!("Logged in as {email}");
        }
        "logout" => {
            client.logout();
            println!("Logged out");
        }
        "whoami" => {
            let user = client.profile().await?;
            println!("{} <{}>", user.full_name(), user.email);
        }
        "leads" => {
            let page = client.list_leads(&ListParams::new()).await?;
            for lead in &page.results {
                println!(
                    "{:<6} {:<12} {:<24} {}",
                    lead.id,
                    lead.status,
                    lead.full_name(),
                    lead.company.as_deref().unwrap_or("-"),
                );
            }
            println!("{} of {} leads", page.results.len(), page.count);
        }
        "clients" => {
            let page = client.list_clients(&ListParams::new()).await?;
            for entry in &page.results {
                println!(
                    "{:<6} {:<24} {}",
                    entry.id,
                    entry.name,
                    entry.email.as_deref().unwrap_or("-"),
                );
            }
            println!("{} of {} clients", page.results.len(), page.count);
        }
        _ => print_usage(),
    }

    Ok(())
}
