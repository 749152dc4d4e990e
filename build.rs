//! Build script for the helpdesk CLI.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so the application finds an example next to the place it
//! reads its `.env` from:
//! - Linux: `~/.local/share/helpdesk-cli/.env.example`
//! - macOS: `~/Library/Application Support/helpdesk-cli/.env.example`
//! - Windows: `%LOCALAPPDATA%/helpdesk-cli/.env.example`
//!
//! Nothing here is required for compilation, so every filesystem problem is
//! reported as a cargo warning instead of failing the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("helpdesk-cli");

    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")).map(|_| ()))
    {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
