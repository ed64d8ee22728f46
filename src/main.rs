mod config;
mod error;
mod fixtures;
mod ipc;
mod model;
mod query;
mod records;
mod results_csv;
mod session;

use anyhow::Context;
use std::io::{self, BufRead, Write};

fn main() {
    if let Err(error) = run() {
        eprintln!("examdeskd error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = config::DeskConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    let fixtures = match &config.fixtures_dir {
        Some(dir) => fixtures::FixtureStore::from_dir(dir)
            .with_context(|| format!("failed to load fixtures from {}", dir.to_string_lossy()))?,
        None => fixtures::FixtureStore::bundled().context("failed to load bundled fixtures")?,
    };
    let session = session::Session::new(
        &fixtures,
        session::SessionOptions {
            id_strategy: config.id_strategy,
            enforce_permissions: config.enforce_permissions,
        },
    );
    let mut state = ipc::AppState {
        config,
        fixtures,
        session,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed; shutting down");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                let reply = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", reply);
                let _ = stdout.flush();
                continue;
            }
        };

        tracing::debug!(id = %req.id, method = %req.method, "request");
        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    Ok(())
}

/// Logs go to stderr; stdout carries the protocol.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("EXAMDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
