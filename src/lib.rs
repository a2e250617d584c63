//! # HTTP/1.1 Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: parsing del stream de
//! bytes, routing a un conjunto fijo de handlers, negociación de
//! `Content-Encoding` y serialización exacta de la respuesta.
//!
//! ## Arquitectura
//!
//! - `http`: Parsing de requests, construcción de responses, gzip
//! - `router`: Enrutamiento de `/`, `/echo/*`, `/user-agent` y `/files/*`
//! - `store`: Lectura/escritura de archivos bajo el directorio raíz
//! - `server`: Listener TCP y pool de workers
//! - `config`: Argumentos CLI y variables de entorno
//! - `error`: Errores de transporte y configuración
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http11_server::config::Config;
//! use http11_server::server::Server;
//!
//! let mut server = Server::new(Config::default());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod server;
pub mod store;
