// Biblioteca raíz del crate `courseplanner`.
// Extrae cursos aprobados desde el texto de un certificado de notas y
// calcula qué requisitos de la carrera siguen pendientes.
pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod planner;
pub mod requirements;
pub mod server;
pub mod server_handlers;
pub mod storage;
pub mod transcript;

pub use errors::PlannerError;
pub use server::run_server;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over `filter`.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .try_init();
}
