//! # User API Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente implementado desde cero: parsea un
//! subconjunto restringido de HTTP a mano, sirve un único endpoint de
//! listado paginado sobre una colección en memoria y serializa las
//! respuestas byte a byte.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y construcción de responses
//! - `store`: Colección en memoria de usuarios con query paginado
//! - `router`: Validación de método/path/parámetros y despacho al store
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `config`: Configuración por CLI y variables de entorno
//! - `logger`: Sink de log con timestamp
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use user_api::config::Config;
//! use user_api::server::Server;
//!
//! let config = Config::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod logger;
pub mod router;
pub mod server;
pub mod store;
