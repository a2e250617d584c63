//! # Errores del Servidor
//!
//! Errores que escapan del manejo de un request. Los errores de parsing,
//! body, archivos y routing viven junto a su módulo y se convierten en 404
//! antes de llegar aquí.

use std::io;
use thiserror::Error;

/// Fallas de transporte: bind del listener o I/O de una conexión
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("connection I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Valores inválidos en la configuración
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("workers must be >= 1")]
    NoWorkers,

    #[error("directory must not be empty")]
    EmptyDirectory,
}
