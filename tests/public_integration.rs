use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_rest_client::error::KrakenError;
use kraken_rest_client::rest::KrakenRestClient;
use kraken_rest_client::rest::public::{AssetFilter, DepthRequest, OhlcRequest, SinceRequest};
use kraken_rest_client::types::OhlcInterval;

fn build_public_client(server: &MockServer) -> KrakenRestClient {
    KrakenRestClient::builder().base_url(server.uri()).build()
}

#[tokio::test]
async fn test_get_server_time() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "unixtime": 1_700_000_000,
            "rfc1123": "Tue, 14 Nov 23 22:13:20 +0000"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let time = client.get_server_time().await.unwrap();
    assert_eq!(time.unixtime, 1_700_000_000);
    assert_eq!(time.rfc1123, "Tue, 14 Nov 23 22:13:20 +0000");
}

#[tokio::test]
async fn test_get_assets_filtered() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBT": {
                "aclass": "currency",
                "altname": "XBT",
                "decimals": 10,
                "display_decimals": 5,
                "status": "enabled"
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Assets"))
        .and(query_param("asset", "XBT,ETH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let assets = client
        .get_assets(Some(&AssetFilter::assets("XBT,ETH")))
        .await
        .unwrap();
    assert_eq!(assets["XXBT"].altname, "XBT");
    assert_eq!(assets["XXBT"].decimals, 10);
}

#[tokio::test]
async fn test_get_assets_unfiltered_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0/public/Assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert!(client.get_assets(None).await.unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_get_ticker() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": {
                "a": ["37080.1", "1", "1.000"],
                "b": ["37080.0", "3", "3.000"],
                "c": ["37080.1", "0.0012"],
                "v": ["1200.5", "2400.1"],
                "p": ["37012.3", "36990.7"],
                "t": [10000, 20000],
                "l": ["36800.0", "36700.0"],
                "h": ["37200.0", "37300.0"],
                "o": "36950.0"
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Ticker"))
        .and(query_param("pair", "XBTUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let ticker = client.get_ticker("XBTUSD").await.unwrap();
    let xbt = &ticker["XXBTZUSD"];
    assert_eq!(xbt.ask(), Some("37080.1".parse().unwrap()));
    assert_eq!(xbt.bid(), Some("37080.0".parse().unwrap()));
    assert_eq!(xbt.t, vec![10000, 20000]);
}

#[tokio::test]
async fn test_get_ohlc_with_interval_and_since() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                [1_700_000_000, "100.0", "110.0", "90.0", "105.0", "102.0", "1.23", 42]
            ],
            "last": 1_700_000_000
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("interval", "60"))
        .and(query_param("since", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let request = OhlcRequest::new("XBTUSD").interval(OhlcInterval::Hour1).since(1);
    let ohlc = client.get_ohlc(&request).await.unwrap();
    assert_eq!(ohlc.get("XXBTZUSD")[0].count, 42);
    assert_eq!(ohlc.last, 1_700_000_000);
}

#[tokio::test]
async fn test_get_order_book() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": {
                "asks": [["37080.1", "1.5", 1_700_000_000]],
                "bids": [["37080.0", "0.25", 1_700_000_001]]
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Depth"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let books = client
        .get_order_book(&DepthRequest::new("XBTUSD").count(10))
        .await
        .unwrap();
    let book = &books["XXBTZUSD"];
    assert_eq!(book.asks[0].volume, "1.5".parse().unwrap());
    assert_eq!(book.bids[0].timestamp, 1_700_000_001);
}

#[tokio::test]
async fn test_get_recent_trades_parsing() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                ["50000.1", "0.1", 1_700_000_000.1, "b", "l", "", 123]
            ],
            "last": "1700000000100000000"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Trades"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let trades = client
        .get_recent_trades(&SinceRequest::new("XBTUSD").count(1))
        .await
        .unwrap();
    let entry = &trades.get("XXBTZUSD")[0];
    assert_eq!(entry.side, "b");
    assert_eq!(entry.trade_id, 123);
    assert_eq!(trades.last, "1700000000100000000");
}

#[tokio::test]
async fn test_get_recent_spreads() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [[1_700_000_000, "37080.0", "37080.1"]],
            "last": 1_700_000_000
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Spread"))
        .and(query_param("since", "1699999999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let spreads = client
        .get_recent_spreads(&SinceRequest::new("XBTUSD").since(1_699_999_999))
        .await
        .unwrap();
    assert_eq!(spreads.get("XXBTZUSD")[0].ask, "37080.1".parse().unwrap());
}

#[tokio::test]
async fn test_rate_limit_error_mapping() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": ["EAPI:Rate limit exceeded"],
        "result": null
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_server_time().await.unwrap_err();
    match err {
        KrakenError::RateLimitExceeded { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}
