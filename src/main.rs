//! # File Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada: parsea la configuración, inicializa el logging
//! (stdout o archivo según `--log`), hace el bind y corre el servidor
//! hasta el Ctrl+C.

use anyhow::Context;
use file_server::config::Config;
use file_server::server::Server;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() {
    println!("=================================");
    println!("  RedUnix Static File Server");
    println!("  Principios de Sistemas Operativos");
    println!("=================================\n");

    let config = Config::new();

    if let Err(error) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", error);
        std::process::exit(1);
    }

    config.print_summary();

    if let Err(error) = init_logging(config.log.as_deref()) {
        eprintln!("💥 Error fatal: {:#}", error);
        std::process::exit(1);
    }

    if let Err(error) = serve(config) {
        tracing::error!("Fatal error: {:#}", error);
        eprintln!("💥 Error fatal: {:#}", error);
        std::process::exit(1);
    }
}

/// Configura el subscriber global de tracing
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }

    Ok(())
}

/// Bind, registro del handler de Ctrl+C y ciclo del servidor
fn serve(config: Config) -> anyhow::Result<()> {
    let address = config.address();
    let server = Server::bind(config)
        .with_context(|| format!("could not start server on {}", address))?;

    let handle = server.shutdown_handle()?;
    ctrlc::set_handler(move || {
        tracing::info!("Shutdown signal received");
        handle.request_stop();
    })
    .context("could not install the Ctrl+C handler")?;

    server.run().context("server loop failed")?;
    Ok(())
}
