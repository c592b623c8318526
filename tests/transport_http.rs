//! Live round trips through the bundled HTTP transport against a local
//! echo server.

use std::io::Read;
use std::thread;

use declarest::{handlers, params, Error, Node};
use serde_json::{json, Value};

/// Start an echo server on an ephemeral port. Every response body is a JSON
/// description of the request; paths under `/private` answer 401.
fn spawn_echo_server() -> u16 {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind echo server");
    let port = server
        .server_addr()
        .to_ip()
        .expect("ip listener")
        .port();

    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);

            let header = |name: &'static str| {
                request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv(name))
                    .map(|h| h.value.as_str().to_string())
            };
            let method = match request.method() {
                tiny_http::Method::Get => "GET",
                tiny_http::Method::Post => "POST",
                tiny_http::Method::Put => "PUT",
                tiny_http::Method::Patch => "PATCH",
                tiny_http::Method::Delete => "DELETE",
                _ => "OTHER",
            };
            let echo = json!({
                "method": method,
                "url": request.url(),
                "body": body,
                "content_type": header("Content-Type"),
                "custom": header("X-Custom"),
                "authorization": header("Authorization"),
            });

            let status: u16 = if request.url().starts_with("/private") {
                401
            } else {
                200
            };
            let response =
                tiny_http::Response::from_string(echo.to_string()).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    port
}

#[test]
fn test_get_with_query_and_headers() {
    let port = spawn_echo_server();
    let client = Node::root(format!("http://127.0.0.1:{port}"));
    client.add_header("X-Custom", "1").unwrap();
    client.get("search", "/todos").unwrap();
    client.start();

    let response = client
        .endpoint("search")
        .unwrap()
        .call(params! { q = "milk" })
        .unwrap();
    assert_eq!(response.status, 200);

    let echo = response.json();
    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["custom"], "1");
    let url = echo["url"].as_str().unwrap();
    assert!(url.starts_with("/todos"), "unexpected url {url}");
    assert!(url.contains("q=milk"), "query missing from {url}");
}

#[test]
fn test_post_sends_json_body() {
    let port = spawn_echo_server();
    let client = Node::root(format!("http://127.0.0.1:{port}"));
    let todos = client.group("todos", "/todos").unwrap();
    todos.post("create", "/").unwrap();
    client.start();

    let response = client
        .subgroup("todos")
        .unwrap()
        .endpoint("create")
        .unwrap()
        .call(params! { value = "buy milk", priority = 2 })
        .unwrap();

    let echo = response.json();
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["url"], "/todos/");
    let content_type = echo["content_type"].as_str().unwrap();
    assert!(content_type.starts_with("application/json"));

    let sent: Value = serde_json::from_str(echo["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent, json!({ "value": "buy milk", "priority": 2 }));
}

#[test]
fn test_path_params_reach_the_wire() {
    let port = spawn_echo_server();
    let client = Node::root(format!("http://127.0.0.1:{port}"));
    client.get("one", "/todos/:id").unwrap();
    client.start();

    let response = client
        .endpoint("one")
        .unwrap()
        .call(params! { id = 42 })
        .unwrap();
    assert_eq!(response.json()["url"], "/todos/42");
}

#[test]
fn test_auth_handler_and_check_ok_over_the_wire() {
    let port = spawn_echo_server();
    let client = Node::root(format!("http://127.0.0.1:{port}"));
    client.set_handler(handlers::check_ok).unwrap();
    client
        .set_auth_handler(|req| req.with_header("Authorization", "Bearer token"))
        .unwrap();
    client.get("open", "/open").unwrap();
    client.get("secret", "/private/secret").unwrap();
    client.start();

    let response = client.endpoint("open").unwrap().call(params! {}).unwrap();
    assert_eq!(response.json()["authorization"], "Bearer token");

    let err = client.endpoint("secret").unwrap().call(params! {}).unwrap_err();
    assert!(matches!(err, Error::RequestAuth { code: 401, .. }));
}

#[test]
fn test_transport_failure_surfaces_as_transport_error() {
    // Nothing listens on this port; the dispatch must fail cleanly.
    let client = Node::root("http://127.0.0.1:9");
    client.get("health", "/__health").unwrap();
    client.start();

    let err = client.endpoint("health").unwrap().call(params! {}).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
