//! Integration tests for the DexScreenerClient using mockito for HTTP mocking.

use dexscreener_gateway::error::DexScreenerError;
use dexscreener_gateway::DexScreenerClient;
use mockito::{Matcher, Server};

const PAIR_BODY: &str = r#"{
    "schemaVersion": "1.0.0",
    "pairs": [{
        "chainId": "ethereum",
        "dexId": "uniswap",
        "pairAddress": "0xpair",
        "baseToken": {
            "address": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            "name": "Wrapped Ether",
            "symbol": "WETH"
        },
        "quoteToken": { "address": "0xusdc", "name": "USD Coin", "symbol": "USDC" },
        "priceNative": "1.0",
        "priceUsd": "3120.55",
        "priceChange": { "m5": 0.1, "h1": -0.2, "h6": 1.5, "h24": -2.75 },
        "liquidity": { "usd": 1250000.5, "base": 400, "quote": 1250000 }
    }]
}"#;

#[test]
fn test_search_pairs() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "wrapped ether".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PAIR_BODY)
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let pairs = client.search_pairs("wrapped ether").unwrap();

    mock.assert();
    assert_eq!(pairs.len(), 1);
    let base = pairs[0].base_token.as_ref().unwrap();
    assert_eq!(base.symbol.as_deref(), Some("WETH"));
    assert_eq!(pairs[0].price_usd, Some(3120.55));
    assert_eq!(client.metrics().http_requests_total(), 1);
    assert_eq!(client.metrics().pairs_fetched_total(), 1);
}

#[test]
fn test_search_without_pair_list_is_invalid() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"schemaVersion": "1.0.0"}"#)
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let result = client.search_pairs("nothing");

    mock.assert();
    assert!(matches!(result, Err(DexScreenerError::InvalidResponse(_))));
}

#[test]
fn test_list_pairs_accepts_data_envelope() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/tokens/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "data": [
                { "baseToken": { "address": "0xa", "name": "Alpha", "symbol": "ALP" }, "priceUsd": "1.5" },
                { "baseToken": { "address": "0xb" } }
            ]
        }"#,
        )
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let pairs = client.list_pairs().unwrap();

    mock.assert();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].price_usd, Some(1.5));
    assert_eq!(pairs[1].price_usd, None);
}

#[test]
fn test_get_token_pairs() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/tokens/0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PAIR_BODY)
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let pairs = client
        .get_token_pairs("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")
        .unwrap();

    mock.assert();
    assert_eq!(pairs.len(), 1);
    assert_eq!(
        pairs[0].liquidity.as_ref().and_then(|l| l.usd),
        Some(1250000.5)
    );
}

#[test]
fn test_get_token_pairs_null_list_is_empty() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/tokens/0xdead")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"schemaVersion": "1.0.0", "pairs": null}"#)
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let pairs = client.get_token_pairs("0xdead").unwrap();

    mock.assert();
    assert!(pairs.is_empty());
}

#[test]
fn test_error_not_found() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/tokens/0xmissing")
        .with_status(404)
        .with_body("Not Found")
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let result = client.get_token_pairs("0xmissing");

    mock.assert();
    assert!(matches!(result, Err(DexScreenerError::NotFound(_))));
    // Failed requests are timed and counted as requests too
    assert_eq!(client.metrics().http_requests_total(), 1);
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_error_rate_limited() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/tokens/")
        .with_status(429)
        .with_body("Too Many Requests")
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let result = client.list_pairs();

    mock.assert();
    assert!(matches!(result, Err(DexScreenerError::RateLimitExceeded)));
}

#[test]
fn test_error_server_failure() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let result = client.search_pairs("sol");

    mock.assert();
    match result {
        Err(DexScreenerError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[test]
fn test_malformed_body_is_json_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/tokens/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>maintenance</html>")
        .create();

    let client = DexScreenerClient::with_base_url(server.url());
    let result = client.list_pairs();

    mock.assert();
    assert!(matches!(result, Err(DexScreenerError::JsonError(_))));
}
