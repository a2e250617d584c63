//! # Códigos de Estado HTTP
//!
//! El servidor solo responde con un conjunto cerrado de códigos:
//!
//! - **200 OK**: la petición fue atendida
//! - **201 Created**: un archivo fue escrito con `POST /files/<name>`
//! - **404 Not Found**: ruta desconocida o cualquier error recuperable

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 201 Created - El recurso fue creado
    Created = 201,

    /// 404 Not Found - Ruta o recurso no encontrado, o request inválido
    NotFound = 404,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::StatusCode;
    /// assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
        }
    }

    /// Status line completa, incluyendo el `\r\n` final
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.status_line(), "HTTP/1.1 200 OK\r\n");
    /// ```
    pub fn status_line(&self) -> &'static str {
        match self {
            StatusCode::Ok => "HTTP/1.1 200 OK\r\n",
            StatusCode::Created => "HTTP/1.1 201 Created\r\n",
            StatusCode::NotFound => "HTTP/1.1 404 Not Found\r\n",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::Created)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::Created.as_u16(), 201);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
    }

    #[test]
    fn test_status_lines_are_exact() {
        assert_eq!(StatusCode::Ok.status_line(), "HTTP/1.1 200 OK\r\n");
        assert_eq!(StatusCode::Created.status_line(), "HTTP/1.1 201 Created\r\n");
        assert_eq!(StatusCode::NotFound.status_line(), "HTTP/1.1 404 Not Found\r\n");
    }

    #[test]
    fn test_status_line_matches_display() {
        for status in [StatusCode::Ok, StatusCode::Created, StatusCode::NotFound] {
            assert_eq!(status.status_line(), format!("HTTP/1.1 {}\r\n", status));
        }
    }

    #[test]
    fn test_is_success() {
        assert!(StatusCode::Ok.is_success());
        assert!(StatusCode::Created.is_success());
        assert!(!StatusCode::NotFound.is_success());
    }
}
