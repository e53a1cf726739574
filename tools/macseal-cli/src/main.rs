//! macseal Command Line Tool
//!
//! Provides commands for working with signed payloads:
//! - canonicalize: print the canonical JSON bytes a payload would be signed over
//! - sign: sign a JSON file against a running macseal server
//! - verify: verify a stored envelope against a running macseal server

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use macseal_canonical::to_canonical_json;
use macseal_http::SealClient;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macseal")]
#[command(version)]
#[command(about = "macseal CLI - canonicalize, sign, and verify JSON payloads")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a JSON file
    #[command(about = "Output the canonical JSON representation")]
    Canonicalize {
        /// Path to the JSON file to canonicalize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Sign a JSON payload via a running server
    #[command(about = "Sign a JSON payload and print the signed envelope")]
    Sign {
        /// Path to the JSON payload file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Base URL of the macseal server
        #[arg(long, default_value = "http://localhost:8080")]
        url: String,
    },

    /// Verify a signed envelope via a running server
    #[command(about = "Verify a stored envelope and report the verdict")]
    Verify {
        /// Path to the envelope file ({"payload": ..., "signature": ...})
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Base URL of the macseal server
        #[arg(long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Canonicalize { file } => handle_canonicalize(&file),
        Commands::Sign { file, url } => handle_sign(&file, &url).await,
        Commands::Verify { file, url } => handle_verify(&file, &url).await,
    }
}

fn read_json(file: &PathBuf) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {} as JSON", file.display()))
}

fn handle_canonicalize(file: &PathBuf) -> Result<()> {
    let value = read_json(file)?;

    let canonical =
        to_canonical_json(&value).with_context(|| "Failed to generate canonical JSON")?;

    std::io::stdout()
        .write_all(&canonical)
        .with_context(|| "Failed to write output")?;

    Ok(())
}

async fn handle_sign(file: &PathBuf, url: &str) -> Result<()> {
    let payload = read_json(file)?;

    let client = SealClient::new(url);
    let envelope = client
        .sign(&payload)
        .await
        .with_context(|| format!("Sign request to {} failed", url))?;

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}

async fn handle_verify(file: &PathBuf, url: &str) -> Result<()> {
    let envelope = read_json(file)?;
    let payload = envelope
        .get("payload")
        .context("envelope file has no payload field")?;
    let signature = envelope
        .get("signature")
        .and_then(|s| s.as_str())
        .context("envelope file has no signature string")?;

    let client = SealClient::new(url);
    let valid = client
        .verify(payload, signature)
        .await
        .with_context(|| format!("Verify request to {} failed", url))?;

    if valid {
        println!("Signature valid");
        Ok(())
    } else {
        println!("Signature INVALID");
        std::process::exit(1);
    }
}
