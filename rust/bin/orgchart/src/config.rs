//! Client-side context management.
//!
//! Reads/writes `~/.orgchart/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use org::PlacementPolicy;

/// Listing path used when a context doesn't set one.
pub const DEFAULT_EMPLOYEES_PATH: &str = "/api/employees";

/// A single context: connection to an employee directory backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Context name (e.g. "portal-prod").
    pub name: String,

    /// Directory base URL (e.g. "https://portal.example.com").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Path of the employee listing endpoint.
    #[serde(default = "default_employees_path")]
    pub employees_path: String,

    /// Bearer token (set by `orgchart login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl Context {
    pub fn new(name: &str, server: &str) -> Self {
        Self {
            name: name.to_string(),
            server: server.to_string(),
            employees_path: default_employees_path(),
            token: String::new(),
        }
    }

    /// Full URL of the employee listing.
    pub fn employees_url(&self) -> String {
        let path = self.employees_path.trim();
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!("{}{}{}", self.server.trim_end_matches('/'), sep, path)
    }
}

fn default_employees_path() -> String {
    DEFAULT_EMPLOYEES_PATH.to_string()
}

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    /// Placement policy file applied to every build, unless `--policy`
    /// overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    /// List of configured contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl ClientConfig {
    /// Default config file path: ~/.orgchart/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the currently active context, if any.
    pub fn current(&self) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == self.current_context)
    }

    /// Get a mutable reference to a context by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn upsert_context(&mut self, ctx: Context) {
        if let Some(existing) = self.get_mut(&ctx.name) {
            *existing = ctx;
        } else {
            self.contexts.push(ctx);
        }
    }

    /// Remove a context by name. Returns true if it was found.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let len = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < len
    }

    /// Resolve the placement policy: `--policy` flag, then the config's
    /// `policy` entry, then the built-in defaults.
    pub fn resolve_policy(&self, flag: Option<&Path>) -> anyhow::Result<PlacementPolicy> {
        let path = flag
            .map(Path::to_path_buf)
            .or_else(|| self.policy.as_ref().map(PathBuf::from));
        match path {
            Some(p) => Ok(PlacementPolicy::load(&p)?),
            None => Ok(PlacementPolicy::default()),
        }
    }
}

/// Return the orgchart config directory (~/.orgchart).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".orgchart")
}
