//! # Modelos del Dominio
//! src/store/models.rs
//!
//! Define los tipos que viajan en el cuerpo JSON de `/users`:
//! usuario, metadata de paginación y la página de resultados.

use serde::{Deserialize, Serialize};

/// Estado de un usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Usuario activo
    Active,

    /// Usuario inactivo
    Inactive,
}

impl UserStatus {
    /// Parsea un estado desde el valor textual del query parameter
    ///
    /// Solo se aceptan exactamente "active" e "inactive".
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }

    /// Representación textual del estado
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

/// Un usuario del sistema
///
/// Inmutable después de su creación; la identidad es el `id`,
/// asignado secuencialmente al inicializar el store (`u1`…`u50`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub status: UserStatus,
}

/// Metadata de paginación de una respuesta de listado
///
/// Derivada en cada query, nunca se persiste por separado.
/// Serializa con claves camelCase (`currentPage`, `totalPages`, `pageSize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

/// Una página de usuarios con su metadata
///
/// Se construye fresca en cada query; no se cachea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    pub metadata: Metadata,
    pub users: Vec<User>,
}
