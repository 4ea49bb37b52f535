//! Runtime configuration, read from the environment (and `.env` when present).

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use gstforge_invoicing::PartyDetails;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Apps-Script style endpoint rows are POSTed to. Sheet export is
    /// unavailable without it.
    pub sheets_endpoint: Option<String>,
    /// Seller profile prefilled into every new draft.
    pub seller: PartyDetails,
    /// When set, exported PDFs are also written here.
    pub output_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            sheets_endpoint: None,
            seller: PartyDetails::default(),
            output_dir: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(anyhow!(e).context("failed to load .env"));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("GSTFORGE_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("GSTFORGE_PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };

        let seller = match get("GSTFORGE_SELLER_FILE") {
            Some(path) => load_seller(Path::new(&path))?,
            None => defaults.seller,
        };

        Ok(Self {
            host: get("GSTFORGE_HOST").unwrap_or(defaults.host),
            port,
            sheets_endpoint: get("GSTFORGE_SHEETS_ENDPOINT"),
            seller,
            output_dir: get("GSTFORGE_OUTPUT_DIR").map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load_seller(path: &Path) -> anyhow::Result<PartyDetails> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seller profile {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid seller profile {}", path.display()))
}
