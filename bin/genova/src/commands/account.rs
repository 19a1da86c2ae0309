//! Account commands: profile and connection status.

use anyhow::Result;

use genova_client::ApiError;

use crate::config::CliConfig;

/// Show the authenticated user's profile.
pub async fn me(output_json: bool, config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;
    let user = client.me().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("ID:     {}", user.id);
        println!("Name:   {}", user.name);
        println!("Email:  {}", user.email);
        println!("Role:   {}", user.role.as_deref().unwrap_or("-"));
    }
    Ok(())
}

/// Show server and session status.
pub async fn status(config: &CliConfig) -> Result<()> {
    println!(
        "Server:    {}",
        if config.server.is_empty() { "-" } else { &config.server }
    );

    if config.server.is_empty() {
        println!("Status:    no server configured");
        return Ok(());
    }

    let client = super::build_client(config)?;

    match client.health().await {
        Ok(()) => println!("Status:    connected"),
        Err(ApiError::RequestFailed { status, .. }) => {
            println!("Status:    error ({})", status);
        }
        Err(e) => println!("Status:    disconnected ({})", e),
    }

    match client.session().profile().await {
        Ok(Some(user)) => println!("Session:   {} <{}>", user.name, user.email),
        Ok(None) => println!("Session:   not logged in"),
        Err(e) => println!("Session:   unreadable ({})", e),
    }
    Ok(())
}

/// Show wallet balance, optionally with the transaction history.
pub async fn wallet(transactions: bool, output_json: bool, config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;
    let balance = client.wallet().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&balance)?);
    } else {
        println!(
            "Balance: {}.{:02} {}",
            balance.balance / 100,
            (balance.balance % 100).abs(),
            balance.currency
        );
    }

    if transactions {
        let txs = client
            .wallet_transactions()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        if output_json {
            println!("{}", serde_json::to_string_pretty(&txs)?);
        } else {
            for tx in txs {
                println!(
                    "{}  {:>10}  {:<8}  {}",
                    tx.created_at,
                    format!("{}.{:02}", tx.amount / 100, (tx.amount % 100).abs()),
                    tx.kind,
                    tx.description.as_deref().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}
