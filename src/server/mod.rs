//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Las tres piezas concurrentes del servidor:
//!
//! 1. `tcp`: el listener que acepta y encola conexiones
//! 2. `queue`: la cola acotada compartida (única estructura mutable)
//! 3. `worker`: el pool fijo de threads que atiende las conexiones
//!
//! ```text
//! accept() → ConnectionQueue → worker_loop → response → close
//! ```

pub mod queue;
pub mod tcp;
pub mod worker;

// Re-exportar para facilitar el uso
pub use queue::ConnectionQueue;
pub use tcp::{Server, ShutdownHandle};
pub use worker::WorkerPool;
