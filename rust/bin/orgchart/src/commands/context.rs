//! Context management commands.

use std::path::Path;

use anyhow::Result;

use crate::config::{ClientConfig, Context};

/// Register a new context pointing at an employee directory.
pub fn create(
    name: &str,
    server: &str,
    employees_path: Option<&str>,
    client_config_path: &Path,
) -> Result<()> {
    if server.is_empty() {
        anyhow::bail!("Server URL cannot be empty.");
    }

    let mut ctx = Context::new(name, server);
    if let Some(p) = employees_path {
        ctx.employees_path = p.to_string();
    }
    let url = ctx.employees_url();

    let mut config = ClientConfig::load(client_config_path)?;
    config.upsert_context(ctx);
    if config.current_context.is_empty() {
        config.current_context = name.to_string();
    }
    config.save(client_config_path)?;

    println!("Context \"{}\" created.", name);
    println!("  Employees: {}", url);
    Ok(())
}

/// List all contexts.
pub fn list(client_config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(client_config_path)?;

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!("Run: orgchart context create <name> --server <url>");
        return Ok(());
    }

    println!("{:2} {:20} {:50} {:6}", "", "NAME", "EMPLOYEES", "TOKEN");
    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context {
            "*"
        } else {
            " "
        };
        let token = if ctx.token.is_empty() { "-" } else { "set" };
        println!("{:2} {:20} {:50} {:6}", marker, ctx.name, ctx.employees_url(), token);
    }

    Ok(())
}

/// Switch current context.
pub fn use_context(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    if !config.contexts.iter().any(|c| c.name == name) {
        anyhow::bail!("Context \"{}\" not found. Run `orgchart context list` to see available contexts.", name);
    }

    config.current_context = name.to_string();
    config.save(client_config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}

/// Set properties on a context.
pub fn set(
    name: &str,
    server: Option<&str>,
    employees_path: Option<&str>,
    client_config_path: &Path,
) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    let ctx = config
        .get_mut(name)
        .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", name))?;

    if let Some(s) = server {
        ctx.server = s.to_string();
    }
    if let Some(p) = employees_path {
        ctx.employees_path = p.to_string();
    }

    config.save(client_config_path)?;
    println!("Context \"{}\" updated.", name);
    Ok(())
}

/// Delete a context.
pub fn delete(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    if !config.remove_context(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }

    config.save(client_config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_use_set_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        create("stage", "http://stage:5000", None, &path).unwrap();
        create("prod", "https://portal", Some("/v1/employees"), &path).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.current_context, "stage");
        assert_eq!(config.contexts.len(), 2);

        use_context("prod", &path).unwrap();
        set("prod", None, Some("/v2/employees"), &path).unwrap();
        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.current().unwrap().employees_url(), "https://portal/v2/employees");

        assert!(use_context("missing", &path).is_err());
        delete("prod", &path).unwrap();
        let config = ClientConfig::load(&path).unwrap();
        assert!(config.current().is_none());
        assert!(delete("prod", &path).is_err());
    }

    #[test]
    fn create_requires_server() {
        let dir = tempfile::tempdir().unwrap();
        assert!(create("x", "", None, &dir.path().join("config.toml")).is_err());
    }
}
