//! Login / logout commands.
//!
//! The directory issues bearer tokens out of band; login just stores one
//! on the current context.

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;

/// Store a bearer token on the current context.
pub fn login(token: &str, client_config_path: &Path) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token cannot be empty.");
    }

    let mut config = ClientConfig::load(client_config_path)?;
    let name = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `orgchart use context <name>`."))?
        .name
        .clone();

    let ctx = config
        .get_mut(&name)
        .ok_or_else(|| anyhow::anyhow!("Context disappeared"))?;
    ctx.token = token.strip_prefix("Bearer ").unwrap_or(token).to_string();
    config.save(client_config_path)?;

    println!("Token saved to context \"{}\".", name);
    Ok(())
}

/// Logout: clear token from current context.
pub fn logout(client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    let current_name = config.current_context.clone();
    if current_name.is_empty() {
        anyhow::bail!("No current context.");
    }

    let ctx = config
        .get_mut(&current_name)
        .ok_or_else(|| anyhow::anyhow!("Current context not found."))?;

    ctx.token = String::new();
    config.save(client_config_path)?;
    println!("Logged out from context \"{}\".", current_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Context;

    #[test]
    fn login_then_logout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = ClientConfig::default();
        config.current_context = "a".to_string();
        config.upsert_context(Context::new("a", "http://localhost:5000"));
        config.save(&path).unwrap();

        login("Bearer abc.def", &path).unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap().current().unwrap().token, "abc.def");

        logout(&path).unwrap();
        assert!(ClientConfig::load(&path).unwrap().current().unwrap().token.is_empty());
    }

    #[test]
    fn login_without_context_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(login("abc", &dir.path().join("config.toml")).is_err());
    }
}
