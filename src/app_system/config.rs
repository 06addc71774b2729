use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::domain::Product;

const BUNDLED_CATALOGUE: &str = include_str!("../../data/products.json");

/// Runtime settings. Every flag can also be set through its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "product_catalog", version, about = "In-memory product catalogue over HTTP")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// JSON file holding the initial products (defaults to the bundled catalogue)
    #[arg(long, env = "PRODUCTS_SEED")]
    pub seed: Option<PathBuf>,

    /// Start with no products at all; takes precedence over `--seed`
    #[arg(long)]
    pub empty: bool,

    /// Capacity of the product actor's mailbox
    #[arg(long, env = "ACTOR_BUFFER", default_value_t = 32)]
    pub buffer_size: usize,
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Reads the initial catalogue: nothing with `--empty`, the given file, or the bundled one.
    pub fn load_seed(&self) -> Result<Vec<Product>> {
        if self.empty {
            return Ok(Vec::new());
        }
        match &self.seed {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading seed file {}", path.display()))?;
                parse_catalogue(&raw).with_context(|| format!("parsing seed file {}", path.display()))
            }
            None => parse_catalogue(BUNDLED_CATALOGUE).context("parsing bundled catalogue"),
        }
    }
}

fn parse_catalogue(raw: &str) -> Result<Vec<Product>> {
    Ok(serde_json::from_str(raw)?)
}
