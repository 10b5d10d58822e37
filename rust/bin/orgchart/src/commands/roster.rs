//! Loading the employee roster, from the directory or from a file.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use org::{parse_roster, Employee};

use crate::config::{ClientConfig, Context};

/// Read the roster from `file` when given, else fetch it through the
/// current context.
pub fn load(file: Option<&Path>, client_config_path: &Path) -> Result<Vec<Employee>> {
    if let Some(path) = file {
        let body = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let employees = parse_roster(&body)?;
        debug!(count = employees.len(), file = %path.display(), "roster loaded from file");
        return Ok(employees);
    }

    let config = ClientConfig::load(client_config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Pass -f <file> or run `orgchart use context <name>`."))?;
    fetch(ctx)
}

/// HTTP client helper.
fn build_client(ctx: &Context) -> Result<reqwest::blocking::Client> {
    if ctx.server.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `orgchart context set {} --server <url>`.",
            ctx.name, ctx.name
        );
    }

    let mut headers = reqwest::header::HeaderMap::new();
    if !ctx.token.is_empty() {
        let val = format!("Bearer {}", ctx.token);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&val)?,
        );
    }

    let client = reqwest::blocking::Client::builder()
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// GET the employee listing for a context.
pub fn fetch(ctx: &Context) -> Result<Vec<Employee>> {
    let client = build_client(ctx)?;
    let url = ctx.employees_url();

    info!(context = %ctx.name, %url, "fetching employees");
    let resp = client
        .get(&url)
        .send()
        .map_err(|e| anyhow::anyhow!("failed to connect to directory: {}", e))?;
    let status = resp.status();
    let body = resp.bytes()?;

    if !status.is_success() {
        anyhow::bail!("Error ({}): {}", status, error_message(&body));
    }

    let employees = parse_roster(&body)?;
    debug!(count = employees.len(), "roster fetched");
    Ok(employees)
}

/// Best-effort error text from a failed response body.
fn error_message(body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json[key].as_str() {
                return msg.to_string();
            }
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        "unknown error".to_string()
    } else {
        text
    }
}
