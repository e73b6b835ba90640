//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod logging;
pub mod renderer;
pub mod repository;

pub use config::Config;
pub use renderer::{CommandRenderer, PdfRenderer};
pub use repository::{FileSystemRepository, JournalRepository};
