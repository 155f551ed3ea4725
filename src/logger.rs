//! # Logger
//! src/logger.rs
//!
//! Sink de logging del servidor: una línea por evento, con prefijo
//! de timestamp. No forma parte del contrato HTTP, es puramente
//! observabilidad local.
//!
//! ## Formato
//!
//! ```text
//! [2025-10-22 14:03:07] Servidor escuchando en 0.0.0.0:8080
//! [2025-10-22 14:03:09] GET /users -> 200 OK
//! ```

use chrono::Local;

/// Escribe una línea de log en stdout con timestamp `YYYY-MM-DD HH:MM:SS`
pub fn log(message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("[{}] {}", timestamp, message);
}
