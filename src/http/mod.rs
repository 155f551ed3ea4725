//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que necesita el
//! servidor, desde cero y sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests HTTP/1.1
//! - Construcción de responses HTTP
//! - Manejo de status codes
//! - Extracción de query parameters
//!
//! ## Alcance
//!
//! No se soporta chunked transfer encoding, keep-alive ni pipelining:
//! cada conexión transporta exactamente un request y un response.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /users?page=1&size=10 HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! Another-Header: Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 13\r\n
//! \r\n
//! {"ok": true}
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;
