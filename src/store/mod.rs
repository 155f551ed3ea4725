//! # Store de Usuarios
//! src/store/mod.rs
//!
//! Colección en memoria de usuarios, generada una sola vez al arrancar
//! el proceso, con una única operación de lectura paginada y filtrada.
//!
//! ## Sincronización
//!
//! Todas las lecturas pasan por un `Mutex` que serializa el acceso a la
//! colección. Hoy la colección es de solo lectura tras la inicialización,
//! pero el contrato serializa igual el acceso para tolerar mutaciones
//! futuras sin introducir una carrera.

pub mod models;

pub use models::{Metadata, User, UserStatus, UsersPage};

use std::sync::{Mutex, PoisonError};

/// Cantidad fija de usuarios generados al inicializar el store
const USER_COUNT: usize = 50;

/// Pool de nombres base para los usuarios generados
const NAME_POOL: [&str; 5] = ["Orko", "Molly", "Rachel", "Eric", "Kate"];

/// Store en memoria con acceso serializado
pub struct UserStore {
    users: Mutex<Vec<User>>,
}

impl UserStore {
    /// Crea el store y genera sus 50 usuarios
    ///
    /// Los ids son secuenciales (`u1`…`u50`) y nunca se reutilizan.
    /// El estado alterna: índices pares activos, impares inactivos,
    /// así el store queda con 25 usuarios de cada estado.
    pub fn new() -> Self {
        let users = (1..=USER_COUNT)
            .map(|index| User {
                id: format!("u{}", index),
                name: format!("{}{}", NAME_POOL[(index - 1) % NAME_POOL.len()], index),
                status: if index % 2 == 0 {
                    UserStatus::Active
                } else {
                    UserStatus::Inactive
                },
            })
            .collect();

        Self {
            users: Mutex::new(users),
        }
    }

    /// Consulta paginada sobre la colección
    ///
    /// Precondiciones (garantizadas por el caller): `page >= 1`, `size >= 1`.
    ///
    /// Filtra por `status` si está presente (sin filtro = todos los
    /// usuarios en orden de inserción), calcula `total_pages` sobre el
    /// conteo filtrado y devuelve la porción de hasta `size` usuarios
    /// que empieza en `(page - 1) * size`. Una página fuera de rango
    /// degrada a lista vacía, nunca a error; la metadata siempre lleva
    /// el `page`/`size` pedidos y el `total_pages` calculado.
    ///
    /// # Ejemplo
    /// ```
    /// use user_api::store::UserStore;
    ///
    /// let store = UserStore::new();
    /// let page = store.query(1, 10, None);
    ///
    /// assert_eq!(page.users.len(), 10);
    /// assert_eq!(page.metadata.total_pages, 5);
    /// ```
    pub fn query(&self, page: usize, size: usize, status: Option<UserStatus>) -> UsersPage {
        // La colección es de solo lectura tras new(): si otro thread
        // llegó a envenenar el lock, los datos siguen siendo válidos
        let users = self
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Filtrar por status si se pidió
        let filtered: Vec<&User> = users
            .iter()
            .filter(|user| status.map_or(true, |s| user.status == s))
            .collect();

        let total_pages = std::cmp::max(1, filtered.len().div_ceil(size));

        // Saturar el offset: un page gigante no debe desbordar la
        // multiplicación, solo degradar a página vacía
        let start_index = page.saturating_sub(1).saturating_mul(size);

        let metadata = Metadata {
            current_page: page,
            total_pages,
            page_size: size,
        };

        // Página fuera de rango: lista vacía con la misma metadata
        if start_index >= filtered.len() {
            return UsersPage {
                metadata,
                users: Vec::new(),
            };
        }

        let end_index = std::cmp::min(start_index.saturating_add(size), filtered.len());
        let page_users = filtered[start_index..end_index]
            .iter()
            .map(|user| (*user).clone())
            .collect();

        UsersPage {
            metadata,
            users: page_users,
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
