use kraken_rest_client::auth::Credentials;
use kraken_rest_client::rest::KrakenRestClient;

fn live_tests_enabled() -> bool {
    std::env::var("KRAKEN_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_public_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = KrakenRestClient::new();
    let time = client.get_server_time().await?;
    assert!(time.unixtime > 0);
    let status = client.get_system_status().await?;
    assert!(!status.status.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let credentials = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(_) => return Ok(()),
    };
    let client = KrakenRestClient::builder()
        .credentials(credentials)
        .traced()
        .build();

    let _balances = client.get_account_balance().await?;
    let token = client.get_websocket_token().await?;
    assert!(!token.token.is_empty());

    Ok(())
}
