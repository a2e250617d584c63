//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 tolerante, línea por línea,
//! sobre cualquier `BufRead` (en producción, el `TcpStream` envuelto en un
//! `BufReader`).
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/foo.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION` (solo se usan método y path)
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que cierra el bloque de headers
//! 4. **Body**: No se lee automáticamente. La ruta que lo necesita pide
//!    exactamente `Content-Length` bytes con [`RequestReader::read_body`],
//!    sobre el mismo cursor que consumió los headers.

use super::HeaderName;
use std::collections::HashMap;
use std::io::{self, BufRead, Read};
use thiserror::Error;

/// Métodos HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// Cualquier otro token; se enruta como GET
    Other(String),
}

impl Method {
    /// Parsea un método HTTP desde el primer token de la request line
    ///
    /// No distingue mayúsculas: `post` es `POST`.
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("GET") {
            Method::GET
        } else if token.eq_ignore_ascii_case("POST") {
            Method::POST
        } else {
            Method::Other(token.to_string())
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

/// Representa un request HTTP parseado (sin body)
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path crudo, sin percent-decoding (ej: "/echo/abc")
    path: String,

    /// Versión tal como vino; no se valida
    version: String,

    /// Headers HTTP; el nombre distingue mayúsculas y el último valor gana
    headers: HashMap<String, String>,
}

/// Errores que pueden ocurrir leyendo el bloque de headers
#[derive(Debug, Error)]
pub enum ParseError {
    /// La conexión se cerró sin enviar nada
    #[error("empty request")]
    Empty,

    /// El stream terminó antes de la línea vacía
    #[error("incomplete HTTP request")]
    Incomplete,

    /// La request line no tiene método y path
    #[error("invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// La request line no es UTF-8
    #[error("request line is not valid UTF-8")]
    InvalidEncoding,

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Indica si el transporte quedó inutilizable y no vale la pena responder
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Empty | ParseError::Incomplete | ParseError::Io(_))
    }
}

/// Errores leyendo el body de un request
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("missing Content-Length header")]
    MissingContentLength,

    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// El cliente cerró antes de mandar todos los bytes declarados
    #[error("body truncated: expected {expected} bytes, got {received}")]
    Truncated { expected: usize, received: usize },

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// Lector de requests sobre un stream con buffer
///
/// El mismo lector entrega primero el head ([`read_head`](Self::read_head)) y
/// luego, si la ruta lo pide, el body ([`read_body`](Self::read_body)).
pub struct RequestReader<R> {
    inner: R,
}

impl<R: BufRead> RequestReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Lee la request line y los headers hasta la línea vacía
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http11_server::http::request::{Method, RequestReader};
    ///
    /// let raw: &[u8] = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl\r\n\r\n";
    /// let mut reader = RequestReader::new(raw);
    /// let request = reader.read_head().unwrap();
    ///
    /// assert_eq!(request.method(), &Method::GET);
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl"));
    /// ```
    pub fn read_head(&mut self) -> Result<Request, ParseError> {
        let request_line = self.read_line()?.ok_or(ParseError::Empty)?;
        let request_line =
            String::from_utf8(request_line).map_err(|_| ParseError::InvalidEncoding)?;
        if request_line.is_empty() {
            return Err(ParseError::InvalidRequestLine(request_line));
        }

        let mut headers = HashMap::new();
        loop {
            let line = self.read_line()?.ok_or(ParseError::Incomplete)?;
            if line.is_empty() {
                break;
            }

            // Bytes fuera de UTF-8 (obs-text) se reemplazan por U+FFFD;
            // líneas sin ": " se ignoran
            let line = String::from_utf8_lossy(&line);
            if let Some((name, value)) = line.split_once(": ") {
                headers.insert(name.to_string(), value.to_string());
            }
        }

        let (method, path, version) = Self::parse_request_line(&request_line)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
        })
    }

    /// Lee exactamente `Content-Length` bytes del stream
    ///
    /// Nunca consume bytes más allá del largo declarado.
    pub fn read_body(&mut self, request: &Request) -> Result<Vec<u8>, BodyError> {
        let raw = request
            .header(HeaderName::ContentLength.as_str())
            .ok_or(BodyError::MissingContentLength)?;
        let digits = raw.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BodyError::InvalidContentLength(raw.to_string()));
        }
        let expected: usize = digits
            .parse()
            .map_err(|_| BodyError::InvalidContentLength(raw.to_string()))?;

        // take() evita reservar de golpe un Content-Length gigante
        let mut body = Vec::new();
        (&mut self.inner).take(expected as u64).read_to_end(&mut body)?;

        if body.len() != expected {
            return Err(BodyError::Truncated {
                expected,
                received: body.len(),
            });
        }

        Ok(body)
    }

    /// Lee una línea terminada en `\n` (con o sin `\r`)
    ///
    /// `Ok(None)` significa EOF antes de cualquier byte. Los bytes se
    /// devuelven sin decodificar.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, ParseError> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        // Una línea cortada por EOF no cuenta como terminada
        if buf.pop() != Some(b'\n') {
            return Err(ParseError::Incomplete);
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        Ok(Some(buf))
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`, separado por espacios ASCII literales
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let mut parts = line.split(' ');

        let method = parts.next().filter(|token| !token.is_empty());
        let path = parts.next();

        match (method, path) {
            (Some(method), Some(path)) => {
                let version = parts.next().unwrap_or_default().to_string();
                Ok((Method::parse(method), path.to_string(), version))
            }
            _ => Err(ParseError::InvalidRequestLine(line.to_string())),
        }
    }
}

impl Request {
    /// Parsea un head completo desde bytes
    ///
    /// Atajo sobre [`RequestReader`] cuando no hace falta leer el body.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http11_server::http::Request;
    ///
    /// let request = Request::parse(b"GET /user-agent HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(request.path(), "/user-agent");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        RequestReader::new(buffer).read_head()
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (el nombre distingue mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// `true` si el cliente envió `Connection: close`
    pub fn wants_close(&self) -> bool {
        self.header(HeaderName::Connection.as_str())
            .is_some_and(|value| value.eq_ignore_ascii_case("close"))
    }
}
