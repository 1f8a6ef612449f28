//! Host-side helper: `cargo run [port]` builds the WASM bundle into
//! `static/pkg` and serves `static/` locally for previewing the site.

use std::env;
use std::process::Command;

use anyhow::{bail, Context, Result};

const DEFAULT_PORT: u16 = 8000;

fn main() -> Result<()> {
    let port = match env::args().nth(1) {
        Some(raw) => raw.parse::<u16>().with_context(|| format!("invalid port {raw:?}"))?,
        None => DEFAULT_PORT,
    };

    // Build wasm bundle
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => bail!("wasm-pack failed ({st}). Ensure the wasm32-unknown-unknown target is installed."),
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .status()
        .context("failed to start http server (python3 required)")?;
    if !status.success() {
        bail!("http server exited with {status}");
    }
    Ok(())
}
