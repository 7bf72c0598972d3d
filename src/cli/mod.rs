use clap::Parser;

use crate::llm::DEFAULT_COMPLETIONS_URL;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Upstream Completions Args ---
    /// Bearer token for the upstream completions API. Requests fail with a 500 when unset.
    #[arg(long, env = "API_KEY_GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Full URL of the upstream chat completions endpoint.
    #[arg(long, env = "COMPLETIONS_URL", default_value = DEFAULT_COMPLETIONS_URL)]
    pub completions_url: String,

    /// Model used by the chat relay.
    #[arg(long, env = "CHAT_MODEL", default_value = "mixtral-8x7b-32768")]
    pub chat_model: String,

    /// Model used by the curl validator.
    #[arg(long, env = "VALIDATOR_MODEL", default_value = "llama-3.3-70b-versatile")]
    pub validator_model: String,

    // --- Server Args ---
    /// Host address and port for the HTTP server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Optional directory holding the browser UI, served at `/`.
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    /// The configured credential, with blank values treated as missing.
    pub fn api_key(&self) -> Option<String> {
        self.groq_api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}
