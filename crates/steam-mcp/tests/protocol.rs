//! End-to-end protocol tests against a mock Steam Community site.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use steam_community::{ClientConfig, SteamService};
use steam_mcp::protocol::ProtocolHandler;
use steam_mcp::transport::StdioTransport;
use steam_mcp::types::*;

// ─────────────────────── helpers ───────────────────────

fn handler_for(server: &MockServer) -> ProtocolHandler {
    let service = SteamService::new(ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        max_attempts: 2,
        retry_backoff: Duration::from_millis(5),
        ..ClientConfig::default()
    })
    .unwrap();
    ProtocolHandler::new(Arc::new(service))
}

fn mcp_request(id: i64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

fn tool_call(id: i64, name: &str, arguments: Value) -> Value {
    mcp_request(id, "tools/call", json!({ "name": name, "arguments": arguments }))
}

async fn send(handler: &ProtocolHandler, msg: Value) -> Option<Value> {
    let parsed: JsonRpcMessage = serde_json::from_value(msg).unwrap();
    handler.handle_message(parsed).await
}

async fn send_unwrap(handler: &ProtocolHandler, msg: Value) -> Value {
    send(handler, msg).await.expect("expected response")
}

/// The text block of a successful tool call.
fn tool_text(resp: &Value) -> &str {
    resp["result"]["content"][0]["text"].as_str().unwrap()
}

const SEARCH_PAGE: &str = r#"
<html><body>
  <a class="search_result_row" data-ds-appid="1091500">
    <div class="search_name"><span class="title" href="https://store.example/app/1091500">Cyberpunk 2077</span></div>
  </a>
</body></html>
"#;

const DETAILS_PAGE: &str = r#"
<html><body>
  <div class="apphub_AppName">Cyberpunk 2077</div>
  <div class="game_description_snippet">Night City awaits.</div>
  <div class="game_purchase_price">¥ 298</div>
  <a class="app_tag">RPG</a><a class="app_tag">Cyberpunk</a>
  <div class="release_date"><div class="date">2020-12-10</div></div>
</body></html>
"#;

const REVIEWS_PAGE: &str = r#"
<html><body>
  <div class="reviews_filter_options"><div class="reviews_filter_summary">共 2 条评论</div></div>
  <div class="apphub_Card" data-gid="1">
    <div class="title positive">推荐</div>
    <div class="apphub_CardTextContent">Loved it</div>
    <a class="apphub_CardContentAuthorName" href="https://steamcommunity.com/id/johnny/">Johnny</a>
  </div>
  <div class="apphub_Card" data-gid="2">
    <div class="title negative">不推荐</div>
    <div class="apphub_CardTextContent">Buggy at launch</div>
    <a class="apphub_CardContentAuthorName" href="https://steamcommunity.com/id/judy">Judy</a>
  </div>
</body></html>
"#;

// ─────────────────────── handshake ───────────────────────

#[tokio::test]
async fn test_initialize_and_initialized() {
    let server = MockServer::start().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        mcp_request(
            0,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test-client", "version": "1.0" }
            }),
        ),
    )
    .await;
    assert_eq!(resp["result"]["serverInfo"]["name"], "steam-mcp");
    assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
    assert!(resp["result"]["capabilities"]["tools"].is_object());

    assert!(!handler.is_initialized().await);
    let none = send(&handler, json!({ "jsonrpc": "2.0", "method": "initialized" })).await;
    assert!(none.is_none());
    assert!(handler.is_initialized().await);
}

#[tokio::test]
async fn test_initialize_without_params() {
    let server = MockServer::start().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(&handler, json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_ping_and_unknown_method() {
    let server = MockServer::start().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(&handler, mcp_request(1, "ping", json!({}))).await;
    assert_eq!(resp["result"], json!({}));
    assert_eq!(resp["id"], 1);

    let resp = send_unwrap(&handler, mcp_request(2, "resources/list", json!({}))).await;
    assert_eq!(resp["error"]["code"], -32601);
}

#[tokio::test]
async fn test_wrong_jsonrpc_version() {
    let server = MockServer::start().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        json!({ "jsonrpc": "1.0", "id": "abc", "method": "ping" }),
    )
    .await;
    assert_eq!(resp["error"]["code"], -32600);
    assert_eq!(resp["id"], "abc");

    let resp = send_unwrap(&handler, json!({ "id": 4, "method": "ping" })).await;
    assert_eq!(resp["error"]["code"], -32600);
    assert_eq!(resp["id"], 4);
}

// ─────────────────────── tools ───────────────────────

#[tokio::test]
async fn test_tools_list() {
    let server = MockServer::start().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(&handler, mcp_request(1, "tools/list", json!({}))).await;
    let names: Vec<&str> = resp["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["get_steam_reviews", "search_steam_games", "get_steam_game_details"]
    );
}

#[tokio::test]
async fn test_search_tool() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("q", "Cyberpunk 2077"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(&server)
        .await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        tool_call(3, "search_steam_games", json!({ "query": "Cyberpunk 2077" })),
    )
    .await;
    assert!(resp["result"].get("isError").is_none());
    let games: Value = serde_json::from_str(tool_text(&resp)).unwrap();
    assert_eq!(games[0]["appId"], "1091500");
    assert_eq!(games[0]["name"], "Cyberpunk 2077");
    assert_eq!(games[0]["url"], "https://store.example/app/1091500");
}

#[tokio::test]
async fn test_details_tool_accepts_numeric_app_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/1091500"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAILS_PAGE))
        .mount(&server)
        .await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        tool_call(4, "get_steam_game_details", json!({ "appId": 1091500 })),
    )
    .await;
    let details: Value = serde_json::from_str(tool_text(&resp)).unwrap();
    assert_eq!(details["name"], "Cyberpunk 2077");
    assert_eq!(details["description"], "Night City awaits.");
    assert_eq!(details["price"], "¥ 298");
    assert_eq!(details["tags"], json!(["RPG", "Cyberpunk"]));
    assert_eq!(details["releaseDate"], "2020-12-10");
}

#[tokio::test]
async fn test_reviews_tool() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/1091500/reviews/"))
        .and(query_param("l", "schinese"))
        .and(query_param("review_type", "all"))
        .and(query_param("num_per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REVIEWS_PAGE))
        .mount(&server)
        .await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        tool_call(5, "get_steam_reviews", json!({ "appId": "1091500", "numPerPage": 2 })),
    )
    .await;
    let page: Value = serde_json::from_str(tool_text(&resp)).unwrap();
    assert_eq!(page["success"], true);
    assert_eq!(page["totalCount"], 2);
    assert_eq!(page["hasMore"], false);
    assert_eq!(page["reviews"][0]["authorId"], "johnny");
    assert_eq!(page["reviews"][0]["rating"], "positive");
    assert_eq!(page["reviews"][1]["authorId"], "judy");
    assert_eq!(page["reviews"][1]["rating"], "negative");
    assert_eq!(page["reviews"][1]["language"], "English");
}

#[tokio::test]
async fn test_reviews_tool_upstream_failure_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        tool_call(6, "get_steam_reviews", json!({ "appId": "1091500" })),
    )
    .await;
    assert!(resp["result"].get("isError").is_none());
    let page: Value = serde_json::from_str(tool_text(&resp)).unwrap();
    assert_eq!(page["success"], false);
    assert_eq!(page["reviews"], json!([]));
    assert!(page["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_search_tool_upstream_failure_is_tool_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        tool_call(7, "search_steam_games", json!({ "query": "anything" })),
    )
    .await;
    assert_eq!(resp["result"]["isError"], true);
    assert!(tool_text(&resp).starts_with("Error: "));
}

#[tokio::test]
async fn test_invalid_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let handler = handler_for(&server);

    let cases = [
        tool_call(1, "search_steam_games", json!({})),
        tool_call(2, "search_steam_games", json!({ "query": "   " })),
        tool_call(3, "get_steam_game_details", json!({ "appId": "../search" })),
        tool_call(4, "get_steam_reviews", json!({ "appId": "730", "numPerPage": 51 })),
        tool_call(5, "get_steam_reviews", json!({ "appId": "730", "filter": "oldest" })),
    ];
    for case in cases {
        let resp = send_unwrap(&handler, case).await;
        assert_eq!(resp["error"]["code"], -32602, "unexpected response: {resp}");
    }
}

#[tokio::test]
async fn test_missing_arguments_and_unknown_tool() {
    let server = MockServer::start().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(
        &handler,
        mcp_request(1, "tools/call", json!({ "name": "search_steam_games" })),
    )
    .await;
    assert_eq!(resp["result"]["isError"], true);
    assert_eq!(tool_text(&resp), "Error: Missing arguments");

    let resp = send_unwrap(&handler, tool_call(2, "steam_buy_game", json!({}))).await;
    assert_eq!(resp["error"]["code"], -32803);
}

// ─────────────────────── transport ───────────────────────

#[tokio::test]
async fn test_stdio_serve_round_trip() {
    let server = MockServer::start().await;
    let transport = StdioTransport::new(handler_for(&server));

    let mut input: Vec<u8> = Vec::new();
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
    input.extend_from_slice(b"\n\n");
    input.extend_from_slice(br#"{"jsonrpc":"2.0","method":"initialized"}"#);
    input.extend_from_slice(b"\n");
    input.extend_from_slice(br#"{"broken":"#);
    input.extend_from_slice(b"\n\xff\xfe garbage\n");
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#);
    input.extend_from_slice(b"\n");

    let mut output: Vec<u8> = Vec::new();
    transport
        .serve(tokio::io::BufReader::new(input.as_slice()), &mut output)
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["error"]["code"], -32700);
    assert_eq!(lines[1]["id"], Value::Null);
    assert_eq!(lines[2]["error"]["code"], -32700);
    assert_eq!(lines[2]["id"], Value::Null);
    assert_eq!(lines[3]["id"], 2);
    assert_eq!(lines[3]["result"]["tools"].as_array().unwrap().len(), 3);
}
