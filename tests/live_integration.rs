use std::{
    fs,
    time::{SystemTime, UNIX_EPOCH},
};

use genz_http::GenZClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(rename = "GENZ_BASE_URL")]
    genz_base_url: Option<String>,
    #[serde(rename = "GENZ_API_KEY")]
    genz_api_key: Option<String>,
}

fn load_live_credentials() -> Result<(String, Option<String>), String> {
    if let Ok(base_url) = std::env::var("GENZ_BASE_URL") {
        return Ok((base_url, std::env::var("GENZ_API_KEY").ok()));
    }

    let content = fs::read_to_string("secrets.json")
        .map_err(|_| "GENZ_BASE_URL env or secrets.json is required".to_owned())?;
    let parsed: SecretsFile = serde_json::from_str(&content)
        .map_err(|err| format!("secrets.json could not be parsed: {err}"))?;

    let base_url = parsed
        .genz_base_url
        .ok_or_else(|| "missing GENZ_BASE_URL in secrets.json".to_owned())?;
    Ok((base_url, parsed.genz_api_key))
}

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock must be after epoch")
        .as_millis()
}

#[tokio::test]
async fn live_mint_and_balance_roundtrip() {
    let (base_url, api_key) = match load_live_credentials() {
        Ok(values) => values,
        Err(_) => {
            eprintln!("skipping live test: credentials not found in env or secrets.json");
            return;
        }
    };

    let client = match api_key {
        Some(key) => GenZClient::new_bearer(base_url, key),
        None => GenZClient::new(base_url),
    };

    client
        .health_check()
        .await
        .expect("health check must succeed");

    let economy = client.economy().await.expect("economy must be readable");
    assert!(!economy.symbol.is_empty());

    let player = format!("sdk-live-{}", unique_suffix());
    let receipt = client.mint(&player, 1).await.expect("mint must succeed");
    assert!(!receipt.transaction_id.is_empty());

    let balance = client
        .balance(&player)
        .await
        .expect("balance must be readable");
    assert_eq!(balance.player_id, player);
}
