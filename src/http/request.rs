//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP desde cero, deliberadamente
//! permisivo: acepta cualquier método como texto (el router decide si
//! lo soporta) y descarta en silencio los headers malformados.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /users?page=1&size=10 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//!
//! El body no se parsea: ningún endpoint soportado lo necesita.

use std::collections::HashMap;

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como llegó (ej: "GET", "POST")
    method: String,

    /// Path de la petición (ej: "/users")
    path: String,

    /// Query parameters parseados (ej: {"page": "1"})
    /// Ante claves duplicadas gana el último valor
    query_params: HashMap<String, String>,

    /// Headers HTTP (ej: {"Host": "localhost:8080"})
    headers: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// Formato inválido de la request line
    InvalidRequestLine(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine(line) => {
                write!(f, "Invalid request line: {}", line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// Los bytes se decodifican de forma lossy (8-bit safe), por lo que
    /// la decodificación nunca falla; los únicos errores posibles son un
    /// request vacío o una request line malformada.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use user_api::http::Request;
    ///
    /// let raw = b"GET /users?page=2 HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/users");
    /// assert_eq!(request.query_param("page"), Some("2"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str = String::from_utf8_lossy(buffer);

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Separar por \r\n para obtener líneas
        let lines: Vec<&str> = request_str.split("\r\n").collect();

        // 1. Parsear la request line (primera línea)
        let (method, path, query_params) = Self::parse_request_line(lines[0])?;

        // 2. Parsear headers (resto de líneas hasta encontrar línea vacía)
        let headers = Self::parse_headers(&lines[1..]);

        Ok(Request {
            method,
            path,
            query_params,
            headers,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path?query HTTP/1.1`
    fn parse_request_line(
        line: &str,
    ) -> Result<(String, String, HashMap<String, String>), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener al menos 3 partes: METHOD TARGET VERSION
        if parts.len() < 3 {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        // La versión debe empezar con "HTTP/"
        if !parts[2].starts_with("HTTP/") {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        let method = parts[0].to_string();
        let (path, query_params) = Self::parse_path_and_query(parts[1]);

        Ok((method, path, query_params))
    }

    /// Parsea el target y extrae los query parameters
    ///
    /// Ejemplo: "/users?page=1&size=10"
    /// Retorna: ("/users", {"page": "1", "size": "10"})
    ///
    /// Un target sin componente de path (ej: "?page=1") usa "/" por defecto.
    fn parse_path_and_query(target: &str) -> (String, HashMap<String, String>) {
        // Buscar el símbolo '?' que separa path de query
        let (raw_path, query_params) = if let Some(query_start) = target.find('?') {
            let query_string = &target[query_start + 1..];
            (&target[..query_start], Self::parse_query_string(query_string))
        } else {
            // No hay query parameters
            (target, HashMap::new())
        };

        let path = if raw_path.is_empty() {
            "/".to_string()
        } else {
            raw_path.to_string()
        };

        (path, query_params)
    }

    /// Parsea una query string en un HashMap
    ///
    /// Ejemplo: "page=1&size=10&status=active"
    /// Retorna: {"page": "1", "size": "10", "status": "active"}
    ///
    /// Ante claves repetidas gana el último valor.
    fn parse_query_string(query: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();

        // Separar por '&' para obtener cada parámetro
        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }

            // Separar por '=' para obtener key y value
            if let Some(eq_pos) = param.find('=') {
                let key = Self::url_decode(&param[..eq_pos]);
                let value = Self::url_decode(&param[eq_pos + 1..]);
                params.insert(key, value);
            } else {
                // Parámetro sin valor (ej: "?debug")
                params.insert(Self::url_decode(param), String::new());
            }
        }

        params
    }

    /// Decodifica percent-encoding estándar de query strings
    ///
    /// Convierte `%XX` a su byte correspondiente y `+` a espacio.
    /// Las secuencias `%` inválidas se dejan tal cual.
    fn url_decode(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut i = 0;

        fn hex_digit(b: u8) -> Option<u8> {
            match b {
                b'0'..=b'9' => Some(b - b'0'),
                b'a'..=b'f' => Some(b - b'a' + 10),
                b'A'..=b'F' => Some(b - b'A' + 10),
                _ => None,
            }
        }

        while i < bytes.len() {
            match bytes[i] {
                b'%' if i + 2 < bytes.len() => {
                    match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                        (Some(hi), Some(lo)) => {
                            decoded.push(hi * 16 + lo);
                            i += 3;
                        }
                        _ => {
                            decoded.push(b'%');
                            i += 1;
                        }
                    }
                }
                b'+' => {
                    decoded.push(b' ');
                    i += 1;
                }
                other => {
                    decoded.push(other);
                    i += 1;
                }
            }
        }

        String::from_utf8_lossy(&decoded).into_owned()
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value". Las líneas sin ':' se
    /// descartan en silencio; la línea vacía marca el fin de los headers.
    fn parse_headers(lines: &[&str]) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        for line in lines {
            // La línea vacía marca el fin de los headers
            if line.trim().is_empty() {
                break;
            }

            if let Some(colon_pos) = line.find(':') {
                let name = line[..colon_pos].trim().to_string();
                let value = line[colon_pos + 1..].trim().to_string();
                headers.insert(name, value);
            }
            // Header sin ':' se ignora
        }

        headers
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los query parameters
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    ///
    /// # Ejemplo
    /// ```
    /// use user_api::http::Request;
    ///
    /// let raw = b"GET /users?size=5 HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.query_param("size"), Some("5"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }
}
