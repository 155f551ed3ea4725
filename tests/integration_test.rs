//! Tests de integración para el servidor de la User API
//! tests/integration_test.rs
//!
//! Levantan un listener efímero en un thread de fondo y ejercitan el
//! ciclo completo por socket real: read → parse → route → write.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use user_api::router::Router;
use user_api::server::Server;
use user_api::store::UserStore;

/// Helper: arranca un servidor de prueba en un puerto efímero
///
/// El thread de fondo acepta conexiones indefinidamente con el mismo
/// dispatch que producción (un thread por conexión).
fn spawn_test_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    let router = Arc::new(Router::new(Arc::new(UserStore::new())));

    thread::spawn(move || {
        for stream in listener.incoming() {
            if let Ok(stream) = stream {
                let router = Arc::clone(&router);
                thread::spawn(move || {
                    let _ = Server::handle_connection(stream, router);
                });
            }
        }
    });

    addr
}

/// Helper: envía un request crudo y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    stream
        .set_write_timeout(Some(Duration::from_secs(5)))
        .expect("write timeout");

    stream.write_all(raw).expect("write");
    stream.flush().expect("flush");
    stream
        .shutdown(std::net::Shutdown::Write)
        .expect("shutdown");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");
    String::from_utf8_lossy(&response).into_owned()
}

/// Helper: envía un GET al path dado
fn send_get(addr: SocketAddr, target: &str) -> String {
    let request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", target);
    send_raw(addr, request.as_bytes())
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    // Buscar la línea vacía que separa headers del body
    if let Some(pos) = response.find("\r\n\r\n") {
        &response[pos + 4..]
    } else {
        ""
    }
}

/// Helper: parsea el body como JSON
fn body_json(response: &str) -> serde_json::Value {
    serde_json::from_str(extract_body(response)).expect("body JSON")
}

#[test]
fn test_root_returns_welcome_message() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert_eq!(
        extract_body(&response),
        r#"{"message":"Welcome to the User API"}"#
    );
}

#[test]
fn test_users_page_1_size_5() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/users?page=1&size=5");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: application/json\r\n"));
    assert!(response.contains("Connection: close\r\n"));

    let body = body_json(&response);
    assert_eq!(body["metadata"]["totalPages"], 10);
    assert_eq!(body["metadata"]["pageSize"], 5);
    assert_eq!(body["users"].as_array().unwrap().len(), 5);
}

#[test]
fn test_users_defaults_to_page_1_size_10() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/users");

    let body = body_json(&response);
    assert_eq!(body["metadata"]["currentPage"], 1);
    assert_eq!(body["metadata"]["pageSize"], 10);
    assert_eq!(body["metadata"]["totalPages"], 5);
    assert_eq!(body["users"].as_array().unwrap().len(), 10);
}

#[test]
fn test_users_status_filter_partitions_store() {
    let addr = spawn_test_server();

    let active = body_json(&send_get(addr, "/users?status=active&size=50"));
    let inactive = body_json(&send_get(addr, "/users?status=inactive&size=50"));

    // 25 activos + 25 inactivos = los 50 del store
    assert_eq!(active["users"].as_array().unwrap().len(), 25);
    assert_eq!(inactive["users"].as_array().unwrap().len(), 25);
    assert!(active["users"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["status"] == "active"));
    assert!(inactive["users"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["status"] == "inactive"));
}

#[test]
fn test_users_record_shape() {
    let addr = spawn_test_server();
    let body = body_json(&send_get(addr, "/users?size=1"));

    let user = &body["users"][0];
    assert_eq!(user["id"], "u1");
    assert!(user["name"].is_string());
    assert!(user["status"] == "active" || user["status"] == "inactive");
}

#[test]
fn test_users_page_zero_is_bad_request() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/users?page=0");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Content-Length: 0\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_users_invalid_status_is_bad_request() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/users?status=pending");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_post_users_is_method_not_allowed() {
    let addr = spawn_test_server();
    let response = send_raw(addr, b"POST /users HTTP/1.1\r\nHost: localhost\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert!(response.contains("Content-Length: 0\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_unknown_path_is_not_found() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/unknown");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.contains("Content-Length: 0\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_users_beyond_last_page_is_empty_200() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/users?page=100&size=10");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    let body = body_json(&response);
    assert_eq!(body["metadata"]["currentPage"], 100);
    assert_eq!(body["metadata"]["totalPages"], 5);
    assert_eq!(body["users"].as_array().unwrap().len(), 0);
}

#[test]
fn test_users_huge_page_value_still_answers_200() {
    // El cliente siempre recibe una status line válida: un page
    // gigantesco degrada a página vacía en vez de tumbar la conexión
    let addr = spawn_test_server();
    let response = send_get(addr, "/users?page=4611686018427387904&size=10");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    let body = body_json(&response);
    assert_eq!(body["metadata"]["currentPage"], 4611686018427387904u64);
    assert_eq!(body["metadata"]["totalPages"], 5);
    assert_eq!(body["users"].as_array().unwrap().len(), 0);
}

#[test]
fn test_malformed_request_line_is_bad_request() {
    let addr = spawn_test_server();
    let response = send_raw(addr, b"ESTO NO ES HTTP\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Content-Length: 0\r\n"));
}

#[test]
fn test_content_length_matches_body_bytes() {
    let addr = spawn_test_server();
    let response = send_get(addr, "/users?page=2&size=7");

    let content_length: usize = response
        .lines()
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .expect("Content-Length header")
        .trim()
        .parse()
        .expect("numeric Content-Length");

    assert_eq!(content_length, extract_body(&response).len());
}

#[test]
fn test_connection_closes_after_response() {
    // Sin keep-alive: read_to_end termina porque el servidor cierra
    let addr = spawn_test_server();
    let response = send_get(addr, "/");
    assert!(!response.is_empty());

    // Una segunda conexión funciona de forma independiente
    let response = send_get(addr, "/users");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn test_concurrent_requests_are_all_served() {
    let addr = spawn_test_server();
    let mut handles = Vec::new();

    for page in 1..=5 {
        handles.push(thread::spawn(move || {
            let response = send_get(addr, &format!("/users?page={}&size=10", page));
            assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
            let body = body_json(&response);
            assert_eq!(body["metadata"]["currentPage"], page);
            assert_eq!(body["users"].as_array().unwrap().len(), 10);
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
