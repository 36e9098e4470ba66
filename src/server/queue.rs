//! # Cola de Conexiones Pendientes
//! src/server/queue.rs
//!
//! Cola acotada y thread-safe entre el listener y los workers. Es la
//! única estructura mutable compartida del servidor.
//!
//! La capacidad es igual al número de workers: cuando está llena, el
//! `push` del listener bloquea hasta que un worker libere un slot, y ese
//! bloqueo es el mecanismo de backpressure (el backlog de `accept` hace
//! de sala de espera). El `pop` bloquea mientras no haya conexiones.
//!
//! `close()` despierta a todos los que esperan: los `pop` pendientes
//! drenan lo que quede y después reciben `None`, que es la señal de
//! terminación de los workers.

use std::collections::VecDeque;
use std::net::TcpStream;
use std::sync::{Condvar, Mutex};

struct QueueState {
    connections: VecDeque<TcpStream>,
    closed: bool,
}

/// Cola acotada de conexiones aceptadas y aún no atendidas
pub struct ConnectionQueue {
    state: Mutex<QueueState>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl ConnectionQueue {
    /// Crea una cola con la capacidad dada (al menos 1)
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be >= 1");

        Self {
            state: Mutex::new(QueueState {
                connections: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Encola una conexión. Bloquea mientras la cola esté llena.
    ///
    /// Si la cola ya se cerró, la conexión se descarta (se cierra al
    /// soltar el stream).
    pub fn push(&self, connection: TcpStream) {
        let mut state = self.state.lock().unwrap();

        while state.connections.len() >= self.capacity && !state.closed {
            state = self.not_full.wait(state).unwrap();
        }

        if state.closed {
            return;
        }

        state.connections.push_back(connection);
        self.not_empty.notify_one();
    }

    /// Saca la conexión más antigua. Bloquea mientras la cola esté
    /// vacía; retorna `None` cuando está cerrada y drenada.
    pub fn pop(&self) -> Option<TcpStream> {
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(connection) = state.connections.pop_front() {
                self.not_full.notify_one();
                return Some(connection);
            }

            if state.closed {
                return None;
            }

            state = self.not_empty.wait(state).unwrap();
        }
    }

    /// Cierra la cola y despierta a todos los bloqueados
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Cantidad de conexiones esperando actualmente
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().connections.len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacidad máxima de la cola
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
