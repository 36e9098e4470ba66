//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! Este módulo aplica la gramática mínima que entiende el servidor de
//! archivos:
//!
//! ```text
//! METHOD SP PATH SP "HTTP..." \r\n
//! (headers ignorados)
//! \r\n
//! ```
//!
//! Solo interesa la primera línea: el método se valida contra una
//! whitelist, el path se decodifica (percent-encoding) y se le recorta
//! el query string. Los headers posteriores se leen del socket pero no
//! se interpretan.

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use thiserror::Error;

/// Gramática de la request line: token de método en mayúsculas, target
/// sin espacios y el literal HTTP. La versión exacta (1.0/1.1) no se
/// valida, igual que en el resto de la familia de servidores del curso.
static REQUEST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]+)\s+(\S+)\s+HTTP").unwrap());

/// Métodos HTTP soportados. El enum es la whitelist: cualquier otro
/// token de método bien formado produce 405.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso (headers + body)
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,
}

impl Method {
    fn from_token(token: &str) -> Result<Self, ParseError> {
        match token {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            other => Err(ParseError::MethodNotAllowed(other.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }

    /// Indica si la respuesta a este método lleva body
    pub fn includes_body(&self) -> bool {
        matches!(self, Method::GET)
    }
}

/// Errores de parsing de la request line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No llegó ningún byte útil antes del fin de los headers
    #[error("empty request")]
    EmptyRequest,

    /// La primera línea no cumple la gramática METHOD PATH HTTP
    #[error("invalid request line")]
    InvalidRequestLine,

    /// Método bien formado pero fuera de la whitelist
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// El target no queda en UTF-8 válido tras decodificarlo
    #[error("invalid percent-encoding in path")]
    InvalidPathEncoding,
}

/// Request parseada: método más path ya decodificado y sin query string.
/// Vive exactamente lo que dura el ciclo de una conexión.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
}

impl Request {
    /// Parsea la request line desde los bytes acumulados del socket
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_server::http::{Method, Request};
    ///
    /// let raw = b"GET /dir2/page.html?arg=1 HTTP/1.0\r\nHost: x\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.path(), "/dir2/page.html");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(buffer)
            .map_err(|_| ParseError::InvalidRequestLine)?;

        if text.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let captures = REQUEST_LINE
            .captures(text)
            .ok_or(ParseError::InvalidRequestLine)?;

        let method = Method::from_token(&captures[1])?;
        let path = Self::decode_target(&captures[2])?;

        Ok(Request { method, path })
    }

    /// Decodifica el target y descarta el query string.
    ///
    /// El orden es el mismo que en las versiones anteriores del servidor:
    /// primero percent-decoding, después el corte en `?`.
    fn decode_target(target: &str) -> Result<String, ParseError> {
        let decoded = percent_decode_str(target)
            .decode_utf8()
            .map_err(|_| ParseError::InvalidPathEncoding)?;

        let path = match decoded.find('?') {
            Some(pos) => &decoded[..pos],
            None => &decoded,
        };

        Ok(path.to_string())
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path decodificado, sin query string
    pub fn path(&self) -> &str {
        &self.path
    }
}
