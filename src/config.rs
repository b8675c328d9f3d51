use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fmt;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret expected in the `x-api-key` request header.
    pub api_key: String,
    pub bucket: String,
    pub region: String,
    /// Custom S3 endpoint for non-AWS providers. Requests use path-style
    /// addressing when this is set.
    pub endpoint_url: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Command-line + environment configuration.
/// The API key and bucket credentials are read from the environment only.
#[derive(Parser, Debug)]
#[command(author, version, about = "JSON export upload API")]
pub struct Args {
    /// Host to bind to (overrides JSON_DROP_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides JSON_DROP_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Destination bucket (overrides JSON_DROP_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Bucket region (overrides JSON_DROP_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// S3-compatible endpoint URL (overrides JSON_DROP_S3_ENDPOINT)
    #[arg(long)]
    pub endpoint_url: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("JSON_DROP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("JSON_DROP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing JSON_DROP_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading JSON_DROP_PORT"),
        };
        let env_bucket = env::var("JSON_DROP_BUCKET").ok();
        let env_region = env::var("JSON_DROP_REGION").unwrap_or_else(|_| "us-east-1".into());
        let env_endpoint = env::var("JSON_DROP_S3_ENDPOINT").ok();

        let api_key = env::var("JSON_DROP_API_KEY").context("JSON_DROP_API_KEY must be set")?;
        let access_key_id =
            env::var("JSON_DROP_ACCESS_KEY_ID").context("JSON_DROP_ACCESS_KEY_ID must be set")?;
        let secret_access_key = env::var("JSON_DROP_SECRET_ACCESS_KEY")
            .context("JSON_DROP_SECRET_ACCESS_KEY must be set")?;

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            api_key,
            bucket: args
                .bucket
                .or(env_bucket)
                .context("JSON_DROP_BUCKET must be set (or pass --bucket)")?,
            region: args.region.unwrap_or(env_region),
            endpoint_url: args.endpoint_url.or(env_endpoint),
            access_key_id,
            secret_access_key,
        };

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `Debug` keeps secrets out of startup logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}
