//! # Módulo HTTP
//!
//! Implementa el subconjunto del protocolo que necesita el servidor de
//! archivos estáticos:
//!
//! - Parsing de la request line (`METHOD PATH HTTP`)
//! - Construcción de responses con el bloque fijo de headers
//! - Conjunto cerrado de códigos de estado
//!
//! No hay conexiones persistentes, ni chunked transfer, ni bodies de
//! request: una petición por conexión y `Connection: close` siempre.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /dir2/page.html?arg=1 HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 38\r\n
//! ...\r\n
//! \r\n
//! <html>...</html>
//! ```

pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::{Response, SERVER_NAME};
pub use status::StatusCode;
