pub mod api;

use crate::assistant::CurlAssistant;
use crate::cli::Args;
use axum_server::tls_rustls::RustlsConfig;
use log::info;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

/// Installs ring as the process-wide rustls provider. Both ring and aws-lc-rs are
/// compiled into this binary, so rustls cannot pick one itself. Safe to call repeatedly.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

pub async fn load_tls_config(
    cert_path: &str,
    key_path: &str
) -> Result<RustlsConfig, Box<dyn Error + Send + Sync>> {
    install_crypto_provider();
    let config = RustlsConfig::from_pem_file(cert_path, key_path).await
        .map_err(|e| format!("Failed to load TLS certificate/key: {}", e))?;
    Ok(config)
}

pub struct Server {
    addr: String,
    assistant: Arc<CurlAssistant>,
    args: Args,
}

impl Server {
    pub fn new(
        addr: String,
        assistant: Arc<CurlAssistant>,
        args: Args,
    ) -> Self {
        Self {
            addr,
            assistant,
            args,
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid server address '{}': {}", self.addr, e))?;
        let app = api::router(self.assistant.clone(), self.args.static_dir.as_deref());

        if self.args.enable_tls {
            let (cert_path, key_path) = match (&self.args.tls_cert_path, &self.args.tls_key_path) {
                (Some(cert), Some(key)) => (cert, key),
                _ => {
                    return Err("TLS is enabled but --tls-cert-path and --tls-key-path are not both set".into());
                }
            };

            let tls_config = load_tls_config(cert_path, key_path).await?;

            info!("HTTPS server listening on: https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        } else {
            let listener = tokio::net::TcpListener::bind(addr).await
                .map_err(|e| format!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e))?;
            info!("HTTP server listening on: http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }

        Ok(())
    }
}
