//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor HTTP con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http11_server --directory /tmp/files --port 4221 --workers 8
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 DATA_DIR=/srv/files ./http11_server
//! ```

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "http11_server")]
#[command(about = "Servidor HTTP/1.1 mínimo: echo, user-agent y archivos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el que se sirven y guardan los archivos de /files/*
    #[arg(short, long, default_value = "/tmp", env = "DATA_DIR")]
    pub directory: PathBuf,

    /// Número de workers que atienden conexiones
    #[arg(short, long, default_value = "5", env = "WORKERS")]
    pub workers: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http11_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDirectory);
        }
        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        tracing::info!(
            address = %self.address(),
            directory = %self.directory.display(),
            workers = self.workers,
            "Server configuration"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "127.0.0.1".to_string(),
            directory: PathBuf::from("/tmp"),
            workers: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.directory, PathBuf::from("/tmp"));
        assert_eq!(config.workers, 5);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_workers() {
        let mut config = Config::default();
        config.workers = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn test_validate_empty_directory() {
        let mut config = Config::default();
        config.directory = PathBuf::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyDirectory));
    }

    #[test]
    fn test_parse_cli_args() {
        let config = Config::try_parse_from([
            "http11_server",
            "--directory",
            "/srv/files",
            "--port",
            "8080",
            "-w",
            "2",
        ])
        .unwrap();

        assert_eq!(config.directory, PathBuf::from("/srv/files"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        let result = Config::try_parse_from(["http11_server", "--port", "http"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_summary() {
        // Sin subscriber instalado no debe hacer panic
        Config::default().log_summary();
    }
}
