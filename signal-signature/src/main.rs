//! signal-sign - command line signing tool
//!
//! Keys and signatures are exchanged as standard base64.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Args, Parser, Subcommand};

use signal_signature::crypto::curve;
use signal_signature::crypto::keys::fingerprint;
use signal_signature::{sign, verify, IdentityKeyPair};

#[derive(Parser)]
#[command(name = "signal-sign", version, about = "Sign and verify with curve25519 keys")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new identity key pair
    Keygen,
    /// Sign a payload
    Sign {
        /// Base64 private key (32 bytes)
        #[arg(long)]
        private_key: String,
        #[command(flatten)]
        payload: Payload,
    },
    /// Verify a detached signature
    Verify {
        /// Base64 public key (33 bytes)
        #[arg(long)]
        public_key: String,
        /// Base64 signature
        #[arg(long)]
        signature: String,
        #[command(flatten)]
        payload: Payload,
    },
    /// Print the fingerprint of a public key
    Fingerprint {
        /// Base64 public key (33 bytes)
        #[arg(long)]
        public_key: String,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Payload {
    /// Payload given inline as UTF-8 text
    #[arg(long)]
    message: Option<String>,
    /// Read the payload from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl Payload {
    fn read(self) -> Result<Vec<u8>> {
        match (self.message, self.file) {
            (Some(message), _) => Ok(message.into_bytes()),
            (None, Some(path)) => std::fs::read(&path)
                .with_context(|| format!("Failed to read payload from {}", path.display())),
            (None, None) => anyhow::bail!("either --message or --file is required"),
        }
    }
}

fn decode(label: &str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value.trim())
        .with_context(|| format!("{} is not valid base64", label))
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Keygen => {
            let identity = IdentityKeyPair::generate();
            let output = serde_json::json!({
                "publicKey": STANDARD.encode(identity.public_key_bytes()),
                "privateKey": STANDARD.encode(&*identity.private_key_bytes()),
                "fingerprint": identity.fingerprint(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            tracing::info!("Generated identity key {}", identity.fingerprint());
        }
        Command::Sign {
            private_key,
            payload,
        } => {
            let private_key = zeroize::Zeroizing::new(decode("private key", &private_key)?);
            let payload = payload.read()?;
            let signature = sign(&payload, &private_key).context("Signing failed")?;
            println!("{}", STANDARD.encode(signature));
        }
        Command::Verify {
            public_key,
            signature,
            payload,
        } => {
            let public_key = decode("public key", &public_key)?;
            let signature = decode("signature", &signature)?;
            let payload = payload.read()?;

            if verify(&signature, &payload, &public_key).context("Verification failed")? {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Fingerprint { public_key } => {
            let bytes = decode("public key", &public_key)?;
            let key = curve::decode_point(&bytes).context("Invalid public key")?;
            println!("{}", fingerprint(&key));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    signal_signature::init_tracing();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
