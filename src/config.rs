//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor de archivos con soporte para argumentos
//! CLI y variables de entorno. Se construye una vez en el arranque y a
//! partir de ahí es de solo lectura: listener y workers la comparten
//! detrás de un `Arc`, sin ningún global mutable.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_server --port 8080 --workers 4 --root ./www --log server.log
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 DOCUMENT_ROOT=/srv/www ./file_server
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "file_server")]
#[command(about = "Servidor HTTP/1.0 de archivos estáticos para Principios de Sistemas Operativos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Número de workers del pool (también es la capacidad de la cola
    /// de conexiones)
    #[arg(short, long, default_value = "4", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Document root: directorio del que se sirven los archivos
    #[arg(short, long, default_value = "./www", env = "DOCUMENT_ROOT")]
    pub root: String,

    /// Archivo de log; sin este flag se loguea a stdout
    #[arg(short, long, env = "HTTP_LOG")]
    pub log: Option<PathBuf>,

    /// Tamaño en bytes de cada lectura del socket
    #[arg(long = "buffer-size", default_value = "1024", env = "BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Timeout de lectura por conexión en milisegundos. Un cliente que
    /// nunca termina de mandar sus headers no retiene al worker para
    /// siempre.
    #[arg(long = "read-timeout", default_value = "60000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.buffer_size == 0 {
            return Err("Buffer size must be >= 1".to_string());
        }

        if self.read_timeout_ms == 0 {
            return Err("Read timeout must be > 0".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:      {}", self.address());
        println!("   Workers:      {} (cola de {} conexiones)", self.workers, self.workers);
        println!("   Root:         {}", self.root);
        match &self.log {
            Some(path) => println!("   Log:          {}", path.display()),
            None => println!("   Log:          stdout"),
        }
        println!("   Buffer:       {} bytes", self.buffer_size);
        println!("   Read timeout: {} ms", self.read_timeout_ms);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            workers: 4,
            root: "./www".to_string(),
            log: None,
            buffer_size: 1024,
            read_timeout_ms: 60_000,
        }
    }
}
