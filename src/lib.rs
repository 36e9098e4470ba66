//! # File Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 de archivos estáticos, concurrente, implementado
//! sobre sockets y threads del sistema operativo: un listener acepta
//! conexiones y las encola, y un pool fijo de workers las drena, una
//! petición por conexión.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: request line, códigos de estado y framing de responses
//! - `resolver`: mapeo de path a archivo bajo el document root + MIME
//! - `server`: listener TCP, cola acotada y pool de workers
//! - `config`: flags CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_server::config::Config;
//! use file_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("startup error");
//! server.run().expect("server error");
//! ```

pub mod config;
pub mod http;
pub mod resolver;
pub mod server;
