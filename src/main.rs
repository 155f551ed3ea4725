//! # User API Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: parsea la configuración desde CLI o
//! variables de entorno y arranca el accept loop. Un fallo de bind es
//! fatal para el proceso.

use user_api::config::Config;
use user_api::logger;
use user_api::server::Server;

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        logger::log(&format!("Configuración inválida: {}", e));
        std::process::exit(1);
    }

    logger::log(&format!("Iniciando servidor en {}", config.address()));

    let server = Server::new(config);

    // run() bloquea en el accept loop; solo retorna con error de bind
    if let Err(e) = server.run() {
        logger::log(&format!("Error fatal: {}", e));
        std::process::exit(1);
    }
}
