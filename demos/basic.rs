use genz_http::{ClientOptions, GenZClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = GenZClient::from_env()
        .map_err(anyhow::Error::msg)?
        .with_options(ClientOptions::default());

    let health = client.health_check().await?;
    println!("health: {health}");

    let economy = client.economy().await?;
    println!("economy: {} ({}), {} decimals", economy.name, economy.symbol, economy.decimals);

    let receipt = client.mint("player-1", 100).await?;
    println!("minted, transaction {}", receipt.transaction_id);

    let balance = client.balance("player-1").await?;
    println!("balance for {}: {}", balance.player_id, balance.balance);

    Ok(())
}
