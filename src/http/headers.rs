//! # Vocabulario de Headers
//!
//! Nombres de headers y content types que el servidor reconoce. Se modelan
//! como enums con su string canónico para que un typo no compile.

/// Headers que el servidor lee o escribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderName {
    ContentType,
    ContentEncoding,
    ContentLength,
    AcceptEncoding,
    UserAgent,
    Connection,
}

impl HeaderName {
    /// Nombre exacto del header, con la capitalización que se busca en el request
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::ContentType => "Content-Type",
            HeaderName::ContentEncoding => "Content-Encoding",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::AcceptEncoding => "Accept-Encoding",
            HeaderName::UserAgent => "User-Agent",
            HeaderName::Connection => "Connection",
        }
    }
}

impl std::fmt::Display for HeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content types que puede llevar una respuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// `text/plain` - echo y user-agent
    TextPlain,

    /// `application/octet-stream` - contenido de archivos
    OctetStream,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TextPlain => "text/plain",
            ContentType::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names() {
        assert_eq!(HeaderName::UserAgent.as_str(), "User-Agent");
        assert_eq!(HeaderName::ContentLength.as_str(), "Content-Length");
        assert_eq!(HeaderName::AcceptEncoding.to_string(), "Accept-Encoding");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ContentType::TextPlain.as_str(), "text/plain");
        assert_eq!(ContentType::OctetStream.to_string(), "application/octet-stream");
    }
}
