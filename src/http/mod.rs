//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (request line, headers y body bajo demanda)
//! - Construcción de responses con orden de headers fijo
//! - Vocabulario cerrado de status codes, headers y content types
//! - Negociación de `Content-Encoding` y compresión gzip
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding; // Negociación y compresión
pub mod headers; // Nombres de headers y content types
pub mod request; // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status; // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use encoding::ContentEncoding;
pub use headers::{ContentType, HeaderName};
pub use request::{Method, Request, RequestReader};
pub use response::Response;
pub use status::StatusCode;
