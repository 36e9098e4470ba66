//! # Pool de Workers
//! src/server/worker.rs
//!
//! Threads de atención de conexiones. Cada worker repite el mismo ciclo
//! síncrono hasta que la cola se cierra:
//!
//! ```text
//! pop → leer bytes → parsear → resolver path → responder → cerrar
//! ```
//!
//! El pool es de tamaño fijo, sin redimensionado: la concurrencia del
//! servidor es exactamente la cantidad de workers. El índice del worker
//! solo se usa para correlacionar logs.
//!
//! Ningún error de una conexión escapa del ciclo: las peticiones
//! malformadas se contestan con su página de error y los errores de
//! transporte se loguean y la conexión se abandona.

use crate::config::Config;
use crate::http::{ParseError, Request, Response, StatusCode};
use crate::resolver::{self, mime, ResolveError};
use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use super::queue::ConnectionQueue;

/// Pool de workers de tamaño fijo drenando una cola compartida
pub struct WorkerPool {
    workers: Vec<Worker>,
}

struct Worker {
    index: usize,
    thread: Option<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Lanza `count` workers de larga vida sobre la cola compartida
    pub fn spawn(
        count: usize,
        queue: Arc<ConnectionQueue>,
        config: Arc<Config>,
        document_root: PathBuf,
    ) -> Self {
        let mut workers = Vec::with_capacity(count);

        for index in 0..count {
            let queue = Arc::clone(&queue);
            let config = Arc::clone(&config);
            let root = document_root.clone();

            let thread = thread::spawn(move || worker_loop(index, queue, config, root));
            workers.push(Worker {
                index,
                thread: Some(thread),
            });
        }

        Self { workers }
    }

    /// Espera a que todos los workers terminen. Los workers terminan
    /// cuando la cola se cierra y queda drenada, así que las conexiones
    /// en vuelo se completan antes de retornar.
    pub fn join(mut self) {
        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    warn!("Worker {}: thread panicked", worker.index);
                }
            }
        }
    }
}

/// Ciclo principal de un worker
fn worker_loop(index: usize, queue: Arc<ConnectionQueue>, config: Arc<Config>, root: PathBuf) {
    info!("Worker {}: started", index);

    while let Some(mut connection) = queue.pop() {
        if let Err(error) = handle_connection(index, &mut connection, &config, &root) {
            warn!("Worker {}: connection error: {}", index, error);
        }
        // el stream se cierra acá, pase lo que pase
        let _ = connection.shutdown(Shutdown::Both);
    }

    info!("Worker {}: shutting down", index);
}

/// Atiende una conexión completa: una petición, una respuesta, cierre.
fn handle_connection(
    index: usize,
    connection: &mut TcpStream,
    config: &Config,
    root: &Path,
) -> std::io::Result<()> {
    connection.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;

    let data = read_request(connection, config.buffer_size)?;
    info!("Worker {}: received {} bytes", index, data.len());

    let response = match Request::parse(&data) {
        Ok(request) => {
            info!(
                "Worker {}: {} {}",
                index,
                request.method().as_str(),
                request.path()
            );
            let outcome = serve_file(root, request.path());
            // la supresión del body depende del método, no del resultado
            outcome.for_method(request.method())
        }
        Err(error) => {
            warn!("Worker {}: parse error: {}", index, error);
            Response::error_page(parse_outcome(&error))
        }
    };

    info!("Worker {}: response {}", index, response.status());

    connection.write_all(&response.to_bytes())?;
    connection.flush()?;

    Ok(())
}

/// Acumula bytes del socket en chunks de tamaño fijo hasta encontrar el
/// fin de headers (`\r\n\r\n`) o hasta que el peer cierre su lado.
fn read_request(connection: &mut TcpStream, buffer_size: usize) -> std::io::Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut chunk = vec![0u8; buffer_size];

    loop {
        let bytes_read = connection.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }

        data.extend_from_slice(&chunk[..bytes_read]);
        if contains_header_terminator(&data) {
            break;
        }
    }

    Ok(data)
}

/// Busca el terminador de headers sobre lo acumulado (no sobre el último
/// chunk: el terminador puede quedar partido entre dos lecturas)
fn contains_header_terminator(data: &[u8]) -> bool {
    data.windows(4).any(|window| window == b"\r\n\r\n")
}

/// Resuelve el path y construye la respuesta correspondiente
fn serve_file(root: &Path, request_path: &str) -> Response {
    let target = match resolver::resolve(root, request_path) {
        Ok(target) => target,
        Err(error) => return Response::error_page(resolve_outcome(&error)),
    };

    match fs::read(target.path()) {
        Ok(content) => Response::file(mime::content_type(target.path()), content),
        // el archivo desapareció entre la resolución y la lectura
        Err(_) => Response::error_page(StatusCode::NotFound),
    }
}

/// Mapea un error de parsing al resultado HTTP
fn parse_outcome(error: &ParseError) -> StatusCode {
    match error {
        ParseError::MethodNotAllowed(_) => StatusCode::MethodNotAllowed,
        _ => StatusCode::BadRequest,
    }
}

/// Mapea un error de resolución al resultado HTTP
fn resolve_outcome(error: &ResolveError) -> StatusCode {
    match error {
        ResolveError::Forbidden => StatusCode::Forbidden,
        ResolveError::NotFound => StatusCode::NotFound,
    }
}
