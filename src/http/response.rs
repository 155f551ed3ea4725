//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 13\r\n
//! \r\n
//! {"ok": true}
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use user_api::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "application/json")
//!     .with_body(r#"{"message": "Hello"}"#);
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::StatusCode;
use std::collections::HashMap;

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP (Content-Type, Content-Length, etc.)
    /// Usamos HashMap para evitar duplicados
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    ///
    /// # Ejemplo
    /// ```
    /// use user_api::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("Content-Type", "application/json");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    ///
    /// # Ejemplo
    /// ```
    /// use user_api::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body("Hello World");
    /// ```
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self.headers.insert(
            "Content-Length".to_string(),
            self.body.len().to_string(),
        );
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers.insert(
            "Content-Length".to_string(),
            self.body.len().to_string(),
        );
        self
    }

    /// Crea una respuesta JSON exitosa (200 OK)
    ///
    /// Establece `Content-Type: application/json`, `Content-Length` y
    /// `Connection: close`.
    ///
    /// # Ejemplo
    /// ```
    /// use user_api::http::Response;
    ///
    /// let response = Response::json(r#"{"status": "ok"}"#);
    /// ```
    pub fn json(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "application/json")
            .with_header("Connection", "close")
            .with_body(body)
    }

    /// Crea una respuesta de error sin cuerpo
    ///
    /// Todas las respuestas no-2xx del servidor van sin body y con
    /// `Content-Length: 0`.
    ///
    /// # Ejemplo
    /// ```
    /// use user_api::http::{Response, StatusCode};
    ///
    /// let response = Response::empty(StatusCode::BadRequest);
    /// ```
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status).with_header("Content-Length", "0")
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene un header de la respuesta
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el cuerpo de la respuesta
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.1:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n` (orden arbitrario)
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    ///
    /// # Ejemplo
    /// ```
    /// use user_api::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body("Hello");
    ///
    /// let bytes = response.to_bytes();
    /// // bytes contiene: "HTTP/1.1 200 OK\r\n...\r\n\r\nHello"
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        // Formato: HTTP/1.1 200 OK\r\n
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si hay)
        result.extend_from_slice(&self.body);

        result
    }
}
