//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread: una lectura, un parse, un route, una escritura, y el socket
//! se cierra.
//!
//! ## Limitaciones conocidas
//!
//! - El dispatch es ilimitado: no hay tope de conexiones en vuelo, por
//!   lo que bajo carga extrema los threads pueden agotar recursos.
//! - Se hace una única lectura sobre un buffer fijo: un request más
//!   grande que el buffer se trunca, no se reensambla.
//! - No hay timeouts: un cliente lento retiene su thread.

use crate::config::Config;
use crate::http::{Request, Response, StatusCode};
use crate::logger;
use crate::router::Router;
use crate::store::UserStore;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Tamaño del buffer de lectura por conexión
///
/// Requests más grandes se truncan (limitación conocida, no se
/// reensambla la lectura).
const READ_BUFFER_SIZE: usize = 4096;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
}

impl Server {
    /// Crea el servidor: inicializa el store y el router
    pub fn new(config: Config) -> Self {
        let store = Arc::new(UserStore::new());
        let router = Router::new(store);

        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Inicia el servidor y bloquea en el accept loop
    ///
    /// Un fallo de bind es fatal y se propaga al caller; un fallo en un
    /// accept individual se loggea y el loop continúa.
    pub fn run(&self) -> std::io::Result<()> {
        let address = self.config.address();

        // Bind con SO_REUSEADDR (lo establece la stdlib en Unix);
        // backlog por defecto del sistema (>= 10)
        let listener = TcpListener::bind(&address)?;
        logger::log(&format!("Servidor escuchando en {}", address));

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, router) {
                            logger::log(&format!("Error en la conexión: {}", e));
                        }
                    });
                }
                Err(e) => {
                    logger::log(&format!("Error al aceptar conexión: {}", e));
                }
            }
        }

        Ok(())
    }

    /// Procesa una conexión completa: read → parse → route → write
    ///
    /// Un request que no parsea igual recibe un 400 bien formado; los
    /// errores de transporte se propagan para que el caller los loggee
    /// y la conexión se abandone sin tumbar el listener. El socket se
    /// cierra al salir (drop del stream).
    pub fn handle_connection(mut stream: TcpStream, router: Arc<Router>) -> std::io::Result<()> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            logger::log("Conexión cerrada por el cliente sin enviar datos");
            return Ok(());
        }

        let response = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => router.route(&request),
            Err(e) => {
                logger::log(&format!("Request malformado -> 400 Bad Request: {}", e));
                Response::empty(StatusCode::BadRequest)
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        Ok(())
    }
}
