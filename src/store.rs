//! # Almacenamiento de Archivos
//! src/store.rs
//!
//! Capacidad mínima que usan las rutas `/files/*`: leer y escribir blobs
//! con nombre bajo un directorio raíz. El router solo ve el trait
//! [`FileStore`]; en producción se usa [`DirStore`].

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    NotFound(String),

    /// El nombre saldría del directorio raíz o no es un nombre simple
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("file system error: {0}")]
    Io(#[from] io::Error),
}

/// Lectura/escritura de archivos por nombre
pub trait FileStore: Send + Sync {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// [`FileStore`] sobre un directorio del sistema de archivos
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Une `name` con la raíz, rechazando cualquier cosa que no sea un
    /// nombre de archivo simple
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty() || name.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(StoreError::InvalidName(name.to_string())),
        }
    }
}

impl FileStore for DirStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(name)?;
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            _ => StoreError::Io(e),
        })
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
