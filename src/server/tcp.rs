//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Un único thread acepta conexiones y las encola en un [`WorkerPool`] de
//! tamaño fijo. Cada conexión la atiende un solo worker de principio a fin:
//!
//! ```text
//! Accepted → Reading → Parsed → Handled → Written → Closed
//! ```
//!
//! Una conexión atiende exactamente un request; luego se cierra.

use super::pool::WorkerPool;
use crate::config::Config;
use crate::error::ServerError;
use crate::http::{RequestReader, Response};
use crate::router::Router;
use crate::store::DirStore;
use std::io::{self, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tiempo máximo esperando que el cliente cierre después de la respuesta
const LINGER_TIMEOUT: Duration = Duration::from_millis(250);

/// Bytes sobrantes que se descartan como máximo antes de cerrar
const LINGER_MAX_BYTES: u64 = 64 * 1024;

/// Servidor HTTP/1.1
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor; `/files/*` se sirve desde `config.directory`
    pub fn new(config: Config) -> Self {
        let store = DirStore::new(config.directory.clone());
        let router = Router::new(Arc::new(store));

        Self {
            config,
            router: Arc::new(router),
            listener: None,
        }
    }

    /// Hace bind del listener sin empezar a aceptar
    ///
    /// Retorna la dirección real (útil con puerto 0).
    pub fn bind(&mut self) -> Result<SocketAddr, ServerError> {
        let listener = self.bind_listener()?;
        let local_addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(local_addr)
    }

    fn bind_listener(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.address();
        TcpListener::bind(&address).map_err(|source| ServerError::Bind { address, source })
    }

    /// Acepta conexiones indefinidamente
    ///
    /// Hace bind si [`bind`](Self::bind) no se llamó antes.
    pub fn run(&mut self) -> Result<(), ServerError> {
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => self.bind_listener()?,
        };

        let local_addr = listener.local_addr()?;
        let pool = WorkerPool::new(self.config.workers)?;

        tracing::info!(
            address = %local_addr,
            workers = pool.size(),
            "Server listening"
        );

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    pool.execute(move || {
                        if let Err(e) = handle_connection(stream, &router) {
                            tracing::warn!(error = %e, "Connection dropped");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to accept connection");
                }
            }
        }

        Ok(())
    }
}

/// Atiende un request completo sobre `stream` y cierra la conexión
///
/// Los errores de request terminan en 404. Solo escapan errores de I/O del
/// socket, que afectan únicamente a esta conexión.
pub fn handle_connection(stream: TcpStream, router: &Router) -> Result<(), ServerError> {
    let start = Instant::now();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let mut reader = RequestReader::new(BufReader::new(stream.try_clone()?));
    let mut writer = stream;

    let response = match reader.read_head() {
        Ok(request) => {
            if request.wants_close() {
                tracing::trace!(peer = %peer, "Client asked for Connection: close");
            }

            let response = router.route(&request, &mut reader);
            let status = response.status().as_u16();
            let elapsed_us = start.elapsed().as_micros() as u64;

            if response.status().is_success() {
                tracing::info!(
                    peer = %peer,
                    method = request.method().as_str(),
                    path = request.path(),
                    status,
                    elapsed_us,
                    "Request handled"
                );
            } else {
                tracing::debug!(
                    peer = %peer,
                    method = request.method().as_str(),
                    path = request.path(),
                    status,
                    elapsed_us,
                    "Request not found"
                );
            }
            response
        }
        Err(e) if e.is_fatal() => {
            tracing::debug!(peer = %peer, error = %e, "Closing without response");
            return Ok(());
        }
        Err(e) => {
            tracing::warn!(peer = %peer, error = %e, "Malformed request");
            Response::not_found()
        }
    };

    writer.write_all(&response.to_bytes())?;
    writer.flush()?;

    linger_close(&mut writer);
    Ok(())
}

/// Cierra la escritura y descarta lo que el cliente aún tenga en vuelo
///
/// Cerrar un socket con datos sin leer hace que el kernel mande RST, y el
/// cliente puede perder la respuesta que ya se escribió.
fn linger_close(stream: &mut TcpStream) {
    if stream.shutdown(Shutdown::Write).is_err() {
        return;
    }
    if stream.set_read_timeout(Some(LINGER_TIMEOUT)).is_err() {
        return;
    }
    let _ = io::copy(&mut stream.take(LINGER_MAX_BYTES), &mut io::sink());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;
    use std::thread;

    fn ephemeral_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").expect("bind")
    }

    fn temp_router() -> (Arc<Router>, DirStore) {
        let dir = std::env::temp_dir().join(format!(
            "http11_server_tcp_{}_{:?}",
            std::process::id(),
            thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let store = DirStore::new(dir);
        (Arc::new(Router::new(Arc::new(store.clone()))), store)
    }

    /// Atiende una conexión en un thread y retorna lo que recibió el cliente
    fn roundtrip(raw: &[u8], close_write: bool) -> Vec<u8> {
        let (router, _) = temp_router();
        roundtrip_with(router, raw, close_write)
    }

    fn roundtrip_with(router: Arc<Router>, raw: &[u8], close_write: bool) -> Vec<u8> {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_connection(stream, &router).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();
        if close_write {
            client.shutdown(Shutdown::Write).unwrap();
        }

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        drop(client);

        t.join().unwrap();
        buf
    }

    #[test]
    fn test_handle_connection_root() {
        let buf = roundtrip(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n", false);
        assert_eq!(buf, b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_handle_connection_echo() {
        let buf = roundtrip(b"GET /echo/hola HTTP/1.1\r\n\r\n", false);
        assert_eq!(
            buf,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\nhola"
        );
    }

    #[test]
    fn test_handle_connection_upload() {
        let (router, store) = temp_router();
        let buf = roundtrip_with(
            router,
            b"POST /files/upload.txt HTTP/1.1\r\nContent-Length: 6\r\n\r\nsaludo",
            false,
        );

        assert_eq!(buf, b"HTTP/1.1 201 Created\r\n\r\n");
        assert_eq!(store.read("upload.txt").unwrap(), b"saludo");
    }

    #[test]
    fn test_handle_connection_unread_body_still_answered() {
        let buf = roundtrip(b"POST /files/x HTTP/1.1\r\n\r\nbody nobody reads", false);
        assert_eq!(buf, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_handle_connection_non_utf8_header() {
        let buf = roundtrip(b"GET / HTTP/1.1\r\nUser-Agent: caf\xe9\r\n\r\n", false);
        assert_eq!(buf, b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_handle_connection_invalid_request_line() {
        let buf = roundtrip(b"GARBAGE\r\n\r\n", false);
        assert_eq!(buf, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_handle_connection_incomplete_head() {
        // El cliente cierra antes de la línea vacía: no hay respuesta
        let buf = roundtrip(b"GET / HTTP/1.1\r\nHost: x\r\n", true);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();
        let (router, _) = temp_router();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            // No se envía nada: read_head ve EOF y la función termina Ok(())
            handle_connection(stream, &router).unwrap();
        });

        drop(TcpStream::connect(addr).unwrap());
        t.join().unwrap();
    }

    #[test]
    fn test_bind_ephemeral_port() {
        let mut config = Config::default();
        config.port = 0;
        let mut server = Server::new(config);

        let addr = server.bind().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_bind_error() {
        let taken = ephemeral_listener();
        let mut config = Config::default();
        config.port = taken.local_addr().unwrap().port();

        let mut server = Server::new(config);
        assert!(matches!(server.bind(), Err(ServerError::Bind { .. })));
    }
}
