//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo mapea (método, path) a uno de los handlers fijos del servidor.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Route → handler → Response
//!                      │
//!                      ├── negotiate(Accept-Encoding)
//!                      └── FileStore (solo /files/*)
//! ```
//!
//! | Path             | Método  | Respuesta                                 |
//! |------------------|---------|-------------------------------------------|
//! | `/` o vacío      | todos   | 200 sin headers ni body                   |
//! | `/echo/<text>`   | todos   | 200 `text/plain` con `<text>`             |
//! | `/user-agent`    | todos   | 200 `text/plain` con el `User-Agent`      |
//! | `/files/<name>`  | POST    | 201, escribe el body en `<name>`          |
//! | `/files/<name>`  | otros   | 200 `application/octet-stream`            |
//! | cualquier otro   | todos   | 404                                       |
//!
//! `route` nunca falla: cualquier error del handler termina en 404.

use crate::http::encoding::{self, negotiate};
use crate::http::request::BodyError;
use crate::http::{ContentType, HeaderName, Method, Request, RequestReader, Response};
use crate::store::{FileStore, StoreError};
use std::io::{self, BufRead};
use std::sync::Arc;
use thiserror::Error;

/// Errores de un handler; todos se responden con 404
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("cannot read request body: {0}")]
    Body(#[from] BodyError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("gzip compression failed: {0}")]
    Compression(#[source] io::Error),
}

/// Destino de un request según su path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    Echo(&'a str),
    UserAgent,
    Files(&'a str),
    NotFound,
}

impl<'a> Route<'a> {
    /// Resuelve el path en orden de prioridad
    ///
    /// El argumento de `/echo/` y `/files/` es el tercer componente del
    /// path separado por `/` (lo que sigue a un `/` extra se descarta).
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::router::Route;
    ///
    /// assert_eq!(Route::resolve("/"), Route::Root);
    /// assert_eq!(Route::resolve("/echo/abc"), Route::Echo("abc"));
    /// assert_eq!(Route::resolve("/files/a.txt"), Route::Files("a.txt"));
    /// assert_eq!(Route::resolve("/nope"), Route::NotFound);
    /// ```
    pub fn resolve(path: &'a str) -> Self {
        if path.is_empty() || path == "/" {
            Route::Root
        } else if path.starts_with("/echo/") {
            Route::Echo(third_component(path))
        } else if path.starts_with("/user-agent") {
            Route::UserAgent
        } else if path.starts_with("/files/") {
            Route::Files(third_component(path))
        } else {
            Route::NotFound
        }
    }
}

/// `"/echo/abc/def"` → `"abc"`
fn third_component(path: &str) -> &str {
    path.split('/').nth(2).unwrap_or_default()
}

/// Router con la tabla de rutas fija del servidor
///
/// Solo guarda estado de lectura, así que se comparte entre workers con `Arc`.
pub struct Router {
    store: Arc<dyn FileStore>,
}

impl Router {
    /// Crea un router que sirve `/files/*` desde `store`
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// `reader` es el mismo lector que produjo `request`; solo se usa para
    /// leer el body de `POST /files/<name>`.
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::router::Router;
    /// use http11_server::http::RequestReader;
    /// use http11_server::store::DirStore;
    /// use std::sync::Arc;
    ///
    /// let router = Router::new(Arc::new(DirStore::new("/tmp")));
    ///
    /// let raw: &[u8] = b"GET /echo/abc HTTP/1.1\r\n\r\n";
    /// let mut reader = RequestReader::new(raw);
    /// let request = reader.read_head().unwrap();
    /// let response = router.route(&request, &mut reader);
    ///
    /// assert_eq!(response.body(), b"abc");
    /// ```
    pub fn route<R: BufRead>(&self, request: &Request, reader: &mut RequestReader<R>) -> Response {
        match self.dispatch(request, reader) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    method = request.method().as_str(),
                    path = request.path(),
                    error = %e,
                    "Request failed, answering 404"
                );
                Response::not_found()
            }
        }
    }

    fn dispatch<R: BufRead>(
        &self,
        request: &Request,
        reader: &mut RequestReader<R>,
    ) -> Result<Response, RouteError> {
        match Route::resolve(request.path()) {
            Route::Root => Ok(Response::ok()),
            Route::Echo(text) => {
                body_response(request, ContentType::TextPlain, text.as_bytes().to_vec())
            }
            Route::UserAgent => {
                let user_agent = request
                    .header(HeaderName::UserAgent.as_str())
                    .ok_or(RouteError::MissingHeader(HeaderName::UserAgent.as_str()))?;
                body_response(request, ContentType::TextPlain, user_agent.as_bytes().to_vec())
            }
            Route::Files(name) => match request.method() {
                Method::POST => self.upload(name, request, reader),
                _ => {
                    let content = self.store.read(name)?;
                    body_response(request, ContentType::OctetStream, content)
                }
            },
            Route::NotFound => {
                tracing::debug!(path = request.path(), "No route matched");
                Ok(Response::not_found())
            }
        }
    }

    /// `POST /files/<name>`: guarda exactamente `Content-Length` bytes
    fn upload<R: BufRead>(
        &self,
        name: &str,
        request: &Request,
        reader: &mut RequestReader<R>,
    ) -> Result<Response, RouteError> {
        let body = reader.read_body(request)?;
        self.store.write(name, &body)?;

        tracing::debug!(file = name, bytes = body.len(), "File stored");
        Ok(Response::created())
    }
}

/// Respuesta 200 con body, comprimido si el cliente aceptó gzip
///
/// `Content-Length` siempre es el largo de los bytes que viajan.
fn body_response(
    request: &Request,
    content_type: ContentType,
    body: Vec<u8>,
) -> Result<Response, RouteError> {
    let response = Response::ok().with_content_type(content_type);

    match negotiate(request.header(HeaderName::AcceptEncoding.as_str())) {
        Some(selected) if selected.is_implemented() => {
            let compressed = encoding::gzip(&body).map_err(RouteError::Compression)?;
            Ok(response
                .with_content_encoding(selected)
                .with_content_length(compressed.len())
                .with_body(compressed))
        }
        _ => Ok(response.with_content_length(body.len()).with_body(body)),
    }
}
