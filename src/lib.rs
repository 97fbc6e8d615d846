// Pokedex - Core Library
// Exposes the catalog, view state and chain logic to the TUI, CLI and server

pub mod catalog;
pub mod palette;
pub mod view;
pub mod chains;
pub mod badges;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(feature = "tui")]
pub mod ui;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use catalog::{Catalog, DanglingLink, Evolution, LinkDirection, LoadOptions, Pokemon};
pub use palette::{ColorToken, Palette};
pub use view::{case_insensitive_contains, Tab, ViewController};
pub use chains::{assemble, ChainLink, EvolutionChain};
pub use badges::{category_labels, Badge, BadgeBar, ALL_LABEL};
pub use config::AppConfig;
pub use error::CatalogError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
