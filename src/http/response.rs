//! # Construcción de Respuestas HTTP
//!
//! Este módulo arma respuestas HTTP/1.1 byte a byte. El orden de los
//! headers es fijo:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Encoding: gzip\r\n
//! Content-Length: 23\r\n
//! \r\n
//! <body>
//! ```
//!
//! Cada header es opcional. `Content-Length` nunca se calcula aquí: quien
//! arma la respuesta lo fija explícitamente, porque con gzip el body que
//! viaja no mide lo mismo que el texto original.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http11_server::http::{ContentType, Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_content_type(ContentType::TextPlain)
//!     .with_content_length(3)
//!     .with_body(b"abc".to_vec());
//!
//! assert_eq!(
//!     response.to_bytes(),
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
//! );
//! ```

use super::{ContentEncoding, ContentType, HeaderName, StatusCode};

const CRLF: &[u8] = b"\r\n";

/// Respuesta HTTP/1.1 en construcción
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    content_type: Option<ContentType>,
    content_encoding: Option<ContentEncoding>,
    content_length: Option<usize>,
    /// Bytes tal como van al cable (ya comprimidos si corresponde)
    body: Option<Vec<u8>>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            content_encoding: None,
            content_length: None,
            body: None,
        }
    }

    /// `HTTP/1.1 200 OK\r\n\r\n`
    pub fn ok() -> Self {
        Self::new(StatusCode::Ok)
    }

    /// `HTTP/1.1 201 Created\r\n\r\n`
    pub fn created() -> Self {
        Self::new(StatusCode::Created)
    }

    /// Respuesta uniforme para rutas desconocidas y errores recuperables
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::Response;
    ///
    /// assert_eq!(Response::not_found().to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    /// ```
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_content_encoding(mut self, encoding: ContentEncoding) -> Self {
        self.content_encoding = Some(encoding);
        self
    }

    /// Fija `Content-Length`; debe coincidir con los bytes del body
    pub fn with_content_length(mut self, length: usize) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Establece el body; se escribe tal cual, sin recodificar
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// No tiene efectos secundarios: se puede llamar varias veces.
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = self.body.as_deref().unwrap_or_default();
        let mut result = Vec::with_capacity(128 + body.len());

        // 1. Status line
        result.extend_from_slice(self.status.status_line().as_bytes());

        // 2. Headers opcionales, en orden fijo
        if let Some(content_type) = self.content_type {
            push_header(&mut result, HeaderName::ContentType, content_type.as_str());
        }
        if let Some(encoding) = self.content_encoding {
            push_header(&mut result, HeaderName::ContentEncoding, encoding.as_str());
        }
        if let Some(length) = self.content_length {
            push_header(&mut result, HeaderName::ContentLength, &length.to_string());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(CRLF);

        // 4. Body (si existe)
        result.extend_from_slice(body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type
    }

    pub fn content_encoding(&self) -> Option<ContentEncoding> {
        self.content_encoding
    }

    pub fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    /// Obtiene el body (vacío si no hay)
    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}

fn push_header(out: &mut Vec<u8>, name: HeaderName, value: &str) {
    out.extend_from_slice(name.as_str().as_bytes());
    out.extend_from_slice(b": ");
    out.extend_from_slice(value.as_bytes());
    out.extend_from_slice(CRLF);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), None);
        assert_eq!(response.content_length(), None);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_bare_responses() {
        assert_eq!(Response::ok().to_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
        assert_eq!(Response::created().to_bytes(), b"HTTP/1.1 201 Created\r\n\r\n");
        assert_eq!(Response::not_found().to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_header_order_is_fixed() {
        // Se agregan en desorden, salen en orden
        let response = Response::new(StatusCode::Ok)
            .with_content_length(2)
            .with_content_encoding(ContentEncoding::Gzip)
            .with_content_type(ContentType::OctetStream)
            .with_body(vec![1, 2]);

        let mut expected = b"HTTP/1.1 200 OK\r\n\
Content-Type: application/octet-stream\r\n\
Content-Encoding: gzip\r\n\
Content-Length: 2\r\n\
\r\n"
            .to_vec();
        expected.extend_from_slice(&[1, 2]);

        assert_eq!(response.to_bytes(), expected);
    }

    #[test]
    fn test_body_without_length_has_no_phantom_header() {
        let response = Response::new(StatusCode::Ok)
            .with_content_type(ContentType::TextPlain)
            .with_body(b"hi".to_vec());

        assert_eq!(
            response.to_bytes(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhi"
        );
    }

    #[test]
    fn test_length_is_never_derived() {
        // Longitud explícita distinta del body: el builder no la corrige
        let response = Response::new(StatusCode::Ok)
            .with_content_length(99)
            .with_body(b"abc".to_vec());

        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.contains("Content-Length: 99\r\n"));
        assert!(text.ends_with("\r\n\r\nabc"));
    }

    #[test]
    fn test_zero_length_is_emitted_when_set() {
        let response = Response::new(StatusCode::Ok)
            .with_content_type(ContentType::TextPlain)
            .with_content_length(0);

        assert_eq!(
            response.to_bytes(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n"
        );
    }

    #[test]
    fn test_to_bytes_is_repeatable() {
        let response = Response::ok().with_content_length(1).with_body(b"x".to_vec());
        assert_eq!(response.to_bytes(), response.to_bytes());
    }
}
