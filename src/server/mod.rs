//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes
//! 3. Lee y parsea requests HTTP
//! 4. Genera y envía responses HTTP
//!
//! Cada conexión se procesa en su propio thread y se cierra tras
//! escribir la respuesta (sin keep-alive).

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
