//! # Listener TCP
//! src/server/tcp.rs
//!
//! Bind del socket de escucha, ciclo de accept y despacho hacia la cola
//! acotada. La concurrencia vive en el pool de workers; el listener es
//! un único thread que solo acepta y encola.
//!
//! Un fallo de bind es fatal: se propaga al caller y el proceso termina
//! con código distinto de cero (un puerto ocupado no se reintenta). El
//! apagado llega por el `ShutdownHandle`: marca el flag, despierta el
//! `accept` con una conexión propia y el ciclo corta; después se cierra
//! la cola y se espera a que los workers terminen lo que tengan en vuelo.

use crate::config::Config;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use super::queue::ConnectionQueue;
use super::worker::WorkerPool;

/// Servidor de archivos estáticos: listener + cola + pool de workers
pub struct Server {
    config: Arc<Config>,
    document_root: PathBuf,
    listener: TcpListener,
    queue: Arc<ConnectionQueue>,
    shutdown: Arc<AtomicBool>,
}

/// Handle para pedir el apagado ordenado desde otro thread (el handler
/// de Ctrl+C o un test)
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    /// Marca el apagado y despierta el accept bloqueado del listener
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
        // conexión de cortesía para destrabar el accept
        let _ = TcpStream::connect(self.addr);
    }
}

impl Server {
    /// Hace el bind del socket y resuelve el document root, una sola
    /// vez. Cualquier error acá es de arranque y no tiene recuperación.
    pub fn bind(config: Config) -> std::io::Result<Self> {
        let document_root = std::fs::canonicalize(&config.root)?;
        let listener = Self::bind_listener(&config)?;

        // la capacidad de la cola es el número de workers: el accept
        // bloqueado contra la cola llena es el backpressure del servidor
        let queue = Arc::new(ConnectionQueue::new(config.workers));

        Ok(Self {
            config: Arc::new(config),
            document_root,
            listener,
            queue,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Socket de escucha con reuso de dirección y el backlog igual al
    /// número de workers (la sala de espera del backpressure)
    fn bind_listener(config: &Config) -> std::io::Result<TcpListener> {
        let bind_addr = config.address().to_socket_addrs()?.next().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                "could not resolve the bind address",
            )
        })?;

        let socket = Socket::new(Domain::for_address(bind_addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&bind_addr.into())?;
        socket.listen(config.workers as i32)?;

        Ok(socket.into())
    }

    /// Dirección real de escucha (útil con puerto 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle de apagado para registrar en el handler de señal
    pub fn shutdown_handle(&self) -> std::io::Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            addr: self.listener.local_addr()?,
        })
    }

    /// Ciclo principal: acepta conexiones y las encola hasta que llegue
    /// el pedido de apagado. Retorna recién cuando los workers
    /// terminaron las conexiones en vuelo.
    pub fn run(self) -> std::io::Result<()> {
        let addr = self.listener.local_addr()?;
        info!("Listening on {} (document root: {})", addr, self.document_root.display());

        let pool = WorkerPool::spawn(
            self.config.workers,
            Arc::clone(&self.queue),
            Arc::clone(&self.config),
            self.document_root.clone(),
        );

        for connection in self.listener.incoming() {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            match connection {
                Ok(connection) => {
                    match connection.peer_addr() {
                        Ok(peer) => info!("Connection from {}", peer),
                        Err(_) => info!("Connection from unknown peer"),
                    }
                    self.queue.push(connection);
                }
                Err(error) => {
                    warn!("Accept error: {}", error);
                }
            }
        }

        info!("Server stop");
        self.queue.close();
        pool.join();

        Ok(())
    }
}
