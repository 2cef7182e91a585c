//! # Policy Subcommands
//!
//! Each handler parses its input, calls into `sia-policy`, and returns a
//! [`Report`] that the caller renders in the selected [`OutputFormat`].

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use sia_core::{decode_exact, Address, CanonicalBytes};
use sia_crypto::PublicKey;
use sia_policy::{parse_spend_policy, standard_address, SpendPolicy};

use crate::config::OutputFormat;

/// Arguments for subcommands that take a policy in text form.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Policy in text form, e.g. `thresh(1,[pk(<hex>),above(100)])`.
    pub policy: String,
}

/// Arguments for the decode subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Canonical binary encoding as hex.
    pub hex: String,
}

/// Arguments for the standard-address subcommand.
#[derive(Args, Debug)]
pub struct StandardAddressArgs {
    /// Ed25519 public key as 64 hex characters.
    pub key: String,
}

/// Result of a policy subcommand. Absent fields are omitted from output.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<SpendPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl Report {
    /// Render for stdout: present values one per line, or one JSON object.
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string(self).context("serializing report"),
            OutputFormat::Text => {
                let mut lines = Vec::new();
                if let Some(p) = &self.policy {
                    lines.push(p.to_string());
                }
                if let Some(a) = &self.address {
                    lines.push(a.to_string());
                }
                if let Some(e) = &self.encoding {
                    lines.push(e.clone());
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

fn parse_arg(text: &str) -> anyhow::Result<SpendPolicy> {
    parse_spend_policy(text).with_context(|| format!("parsing policy {text:?}"))
}

/// Normalize a policy to its canonical text form.
pub fn run_parse(args: &PolicyArgs) -> anyhow::Result<Report> {
    let policy = parse_arg(&args.policy)?;
    Ok(Report {
        policy: Some(policy),
        ..Report::default()
    })
}

/// Derive the address of a policy.
pub fn run_address(args: &PolicyArgs) -> anyhow::Result<Report> {
    let policy = parse_arg(&args.policy)?;
    let address = policy.address();
    tracing::info!(%address, "derived address");
    Ok(Report {
        address: Some(address),
        ..Report::default()
    })
}

/// Print the canonical binary encoding as lowercase hex.
pub fn run_encode(args: &PolicyArgs) -> anyhow::Result<Report> {
    let policy = parse_arg(&args.policy)?;
    let bytes = CanonicalBytes::new(&policy);
    tracing::debug!(len = bytes.len(), "encoded policy");
    Ok(Report {
        encoding: Some(bytes.to_hex()),
        ..Report::default()
    })
}

/// Decode canonical bytes back to a policy.
pub fn run_decode(args: &DecodeArgs) -> anyhow::Result<Report> {
    let bytes = hex::decode(args.hex.trim()).context("decoding hex input")?;
    let policy: SpendPolicy =
        decode_exact(&bytes).context("decoding canonical policy bytes")?;
    Ok(Report {
        policy: Some(policy),
        ..Report::default()
    })
}

/// Address of `pk(<key>)`.
pub fn run_standard_address(args: &StandardAddressArgs) -> anyhow::Result<Report> {
    let key: PublicKey = args
        .key
        .trim()
        .parse()
        .with_context(|| format!("parsing public key {:?}", args.key))?;
    Ok(Report {
        address: Some(standard_address(key)),
        ..Report::default()
    })
}
