//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que decide la respuesta para cada
//! request parseado.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → (UserStore) → Response
//! ```
//!
//! El router valida método y path, valida los query parameters y
//! consulta el store de usuarios. Toda rama de decisión emite
//! exactamente una línea de log (método, path, status decidido).
//!
//! ## Rutas
//!
//! | Método | Path     | Resultado                                  |
//! |--------|----------|--------------------------------------------|
//! | GET    | `/`      | 200, mensaje de bienvenida                 |
//! | GET    | `/users` | 200, página de usuarios (o 400 inválido)   |
//! | GET    | otro     | 404                                        |
//! | no-GET | *        | 405                                        |

use crate::http::{Request, Response, StatusCode};
use crate::logger;
use crate::store::{UserStatus, UserStore};
use std::sync::Arc;

/// Router del servidor: mapea requests a responses consultando el store
pub struct Router {
    store: Arc<UserStore>,
}

impl Router {
    /// Crea un router sobre el store de usuarios
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }

    /// Decide la respuesta para un request
    ///
    /// Todos los errores a nivel de request se recuperan en una
    /// respuesta HTTP bien formada: este método nunca falla.
    ///
    /// # Ejemplo
    /// ```
    /// use std::sync::Arc;
    /// use user_api::http::{Request, StatusCode};
    /// use user_api::router::Router;
    /// use user_api::store::UserStore;
    ///
    /// let router = Router::new(Arc::new(UserStore::new()));
    /// let request = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request);
    ///
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// ```
    pub fn route(&self, request: &Request) -> Response {
        let method = request.method();
        let path = request.path();

        // 1. Solo se soporta GET
        if method != "GET" {
            logger::log(&format!("{} {} -> 405 Method Not Allowed", method, path));
            return Response::empty(StatusCode::MethodNotAllowed);
        }

        match path {
            "/" => self.handle_root(),
            "/users" => self.handle_users(request),
            _ => {
                logger::log(&format!("GET {} -> 404 Not Found", path));
                Response::empty(StatusCode::NotFound)
            }
        }
    }

    /// GET / — mensaje de bienvenida
    fn handle_root(&self) -> Response {
        let body = serde_json::json!({"message": "Welcome to the User API"});
        logger::log("GET / -> 200 OK");
        Response::json(&body.to_string())
    }

    /// GET /users — listado paginado con filtro opcional por status
    ///
    /// Query parameters:
    /// - `page`: entero >= 1 (default 1; no-numérico cae al default)
    /// - `size`: entero >= 1 (default 10; no-numérico cae al default)
    /// - `status`: "active" o "inactive" (opcional)
    fn handle_users(&self, request: &Request) -> Response {
        // Valores no-numéricos caen al default; los fuera de rango
        // (<= 0) sí son error
        let page: i64 = request.query_param("page").unwrap_or("1").parse().unwrap_or(1);
        let size: i64 = request.query_param("size").unwrap_or("10").parse().unwrap_or(10);

        if page <= 0 || size <= 0 {
            logger::log(&format!(
                "GET /users -> 400 Bad Request (page={}, size={})",
                page, size
            ));
            return Response::empty(StatusCode::BadRequest);
        }

        let status = match request.query_param("status") {
            Some(value) => match UserStatus::from_str(value) {
                Some(status) => Some(status),
                None => {
                    logger::log(&format!(
                        "GET /users -> 400 Bad Request (status={})",
                        value
                    ));
                    return Response::empty(StatusCode::BadRequest);
                }
            },
            None => None,
        };

        let users_page = self.store.query(page as usize, size as usize, status);

        match serde_json::to_string(&users_page) {
            Ok(body) => {
                logger::log(&format!(
                    "GET /users -> 200 OK (page={}, size={}, status={})",
                    page,
                    size,
                    status.map_or("all", |s| s.as_str())
                ));
                Response::json(&body)
            }
            Err(e) => {
                logger::log(&format!("GET /users -> 500 Internal Server Error: {}", e));
                Response::empty(StatusCode::InternalServerError)
            }
        }
    }
}
