//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Arma la respuesta completa para un resultado dado: status line,
//! bloque fijo de headers, línea vacía y body opcional.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Cache-Control: no-cache, no-store, max-age=0, must-revalidate\r\n
//! Date: Mon, 01 Jan 2024 00:00:00 GMT\r\n
//! Server: RedUnix-Static/1.0\r\n
//! Expires: 0\r\n
//! Pragma: no-cache\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 38\r\n
//! Connection: close\r\n
//! \r\n
//! <body>
//! ```
//!
//! El body se escribe solo cuando el método lo pide (GET). Para HEAD se
//! envían exactamente los mismos headers, Content-Length incluido, sin
//! bytes de body: la supresión del body es un flag derivado del método,
//! nunca del resultado.

use super::{Method, StatusCode};
use chrono::Utc;

/// Identificación del servidor en el header `Server` y en las páginas
/// de error.
pub const SERVER_NAME: &str = "RedUnix-Static/1.0";

/// Respuesta lista para serializar hacia el cliente
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
    include_body: bool,
}

impl Response {
    /// Crea una respuesta 200 con el contenido de un archivo
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::{Response, StatusCode};
    ///
    /// let response = Response::file("text/html", b"<html></html>".to_vec());
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// assert_eq!(response.content_length(), 13);
    /// ```
    pub fn file(content_type: &'static str, content: Vec<u8>) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type,
            body: content,
            include_body: true,
        }
    }

    /// Crea la página de error mínima para un resultado no exitoso
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error_page(StatusCode::NotFound);
    /// let text = String::from_utf8(response.body().to_vec()).unwrap();
    /// assert!(text.contains("404 Not Found"));
    /// ```
    pub fn error_page(status: StatusCode) -> Self {
        let description = status.to_string();
        let body = format!(
            "<html><head><title>{description}</title></head>\
             <body><h1>{description}</h1><hr/>{SERVER_NAME}</body></html>"
        );

        Self {
            status,
            content_type: "text/html",
            body: body.into_bytes(),
            include_body: true,
        }
    }

    /// Ajusta la inclusión del body según el método de la petición.
    /// HEAD conserva los headers intactos y suprime los bytes del body.
    pub fn for_method(mut self, method: Method) -> Self {
        self.include_body = method.includes_body();
        self
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Longitud exacta del body en bytes (la que anuncia Content-Length,
    /// se escriba el body o no)
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serializa la respuesta completa, lista para un único write
    pub fn to_bytes(&self) -> Vec<u8> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT");

        let head = format!(
            "HTTP/1.1 {}\r\n\
             Cache-Control: no-cache, no-store, max-age=0, must-revalidate\r\n\
             Date: {}\r\n\
             Server: {}\r\n\
             Expires: 0\r\n\
             Pragma: no-cache\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            self.status,
            date,
            SERVER_NAME,
            self.content_type,
            self.body.len(),
        );

        let mut bytes = head.into_bytes();
        if self.include_body {
            bytes.extend_from_slice(&self.body);
        }
        bytes
    }
}
