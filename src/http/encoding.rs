//! # Negociación de Content-Encoding
//! src/http/encoding.rs
//!
//! Lee el header `Accept-Encoding` del cliente y elige una codificación.
//!
//! ```text
//! Accept-Encoding: invalid-1, gzip, deflate
//!                  ^^^^^^^^^  ^^^^
//!                  se ignora  primera coincidencia → Gzip
//! ```
//!
//! Gana el orden del cliente, no una preferencia fija del servidor. Solo
//! gzip tiene compresor; cualquier otra selección se sirve sin comprimir.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Codificaciones que el servidor sabe nombrar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
    Deflate,
    GzipDeflate,
}

impl ContentEncoding {
    const ALL: [ContentEncoding; 3] = [
        ContentEncoding::Gzip,
        ContentEncoding::Deflate,
        ContentEncoding::GzipDeflate,
    ];

    /// Valor canónico tal como va en el header
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
            ContentEncoding::Deflate => "deflate",
            ContentEncoding::GzipDeflate => "gzip, deflate",
        }
    }

    /// Busca un token (ya sin espacios) ignorando mayúsculas
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.as_str().eq_ignore_ascii_case(token))
    }

    /// Indica si existe un compresor para esta codificación
    pub fn is_implemented(&self) -> bool {
        matches!(self, ContentEncoding::Gzip)
    }
}

impl std::fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elige la codificación a partir del valor de `Accept-Encoding`
///
/// # Ejemplo
/// ```
/// use http11_server::http::encoding::{negotiate, ContentEncoding};
///
/// assert_eq!(negotiate(None), None);
/// assert_eq!(negotiate(Some("br, GZIP")), Some(ContentEncoding::Gzip));
/// ```
pub fn negotiate(accept_encoding: Option<&str>) -> Option<ContentEncoding> {
    accept_encoding?
        .split(',')
        .find_map(|token| ContentEncoding::from_token(token.trim()))
}

/// Comprime `data` en formato gzip
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() + 32), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_negotiate_absent_header() {
        assert_eq!(negotiate(None), None);
    }

    #[test]
    fn test_negotiate_single_gzip() {
        assert_eq!(negotiate(Some("gzip")), Some(ContentEncoding::Gzip));
    }

    #[test]
    fn test_negotiate_skips_unknown_tokens() {
        let header = "invalid-encoding-1, gzip, invalid-encoding-2";
        assert_eq!(negotiate(Some(header)), Some(ContentEncoding::Gzip));
    }

    #[test]
    fn test_negotiate_only_unknown_tokens() {
        assert_eq!(negotiate(Some("br, zstd")), None);
        assert_eq!(negotiate(Some("")), None);
    }

    #[test]
    fn test_negotiate_first_match_wins() {
        assert_eq!(negotiate(Some("deflate, gzip")), Some(ContentEncoding::Deflate));
        assert_eq!(negotiate(Some("gzip, deflate")), Some(ContentEncoding::Gzip));
    }

    #[test]
    fn test_negotiate_case_insensitive() {
        assert_eq!(negotiate(Some("  GZip ")), Some(ContentEncoding::Gzip));
    }

    #[test]
    fn test_from_token_compound() {
        assert_eq!(
            ContentEncoding::from_token("gzip, deflate"),
            Some(ContentEncoding::GzipDeflate)
        );
    }

    #[test]
    fn test_only_gzip_is_implemented() {
        assert!(ContentEncoding::Gzip.is_implemented());
        assert!(!ContentEncoding::Deflate.is_implemented());
        assert!(!ContentEncoding::GzipDeflate.is_implemented());
    }

    #[test]
    fn test_gzip_output_decodes() {
        let compressed = gzip(b"abc").unwrap();

        // Magic number de gzip
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoded = String::new();
        GzDecoder::new(&compressed[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "abc");
    }
}
