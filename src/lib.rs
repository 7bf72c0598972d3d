pub mod assistant;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;

use assistant::CurlAssistant;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Completions URL: {}", args.completions_url);
    info!("Chat Model: {}", args.chat_model);
    info!("Validator Model: {}", args.validator_model);
    info!("API Key Configured: {}", args.api_key().is_some());
    info!("Static Dir: {}", args.static_dir.as_deref().unwrap_or("none"));
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let assistant = Arc::new(CurlAssistant::from_args(&args)?);
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, assistant, args.clone());
    server.run().await?;

    Ok(())
}
