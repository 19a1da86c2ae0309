//! Login / logout commands.

use anyhow::Result;

use crate::config::CliConfig;

/// Login to the configured server.
pub async fn login(email: &str, password: &str, config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;

    let user = client
        .login(email, password)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;

    println!("Logged in as {} <{}>.", user.name, user.email);
    println!(
        "Session saved to {}.",
        config.resolve_data_dir().join("session.redb").display()
    );
    Ok(())
}

/// Logout — erase the stored session.
pub async fn logout(config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;
    client
        .logout()
        .await
        .map_err(|e| anyhow::anyhow!("Logout failed: {}", e))?;
    println!("Logged out.");
    Ok(())
}
