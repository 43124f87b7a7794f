//! Outline Mirror - live outline tree view for an editor
//!
//! Keeps a box-drawn rendering of a document's structural outline in step
//! with notifications from an analysis server, and tracks which outline node
//! encloses the editor cursor. Follows the Elm Architecture: inbound events
//! become [`Msg`]s, [`update::update`] turns them into state changes plus
//! [`Cmd`]s, and the [`runtime`] applies those against a display surface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod outline;
pub mod protocol;
pub mod runtime;
pub mod store;
pub mod surface;
pub mod sync;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::OutlineConfig;
pub use messages::Msg;
pub use model::OutlineModel;
pub use store::{DocumentId, TreeStore};
pub use sync::ViewSynchronizer;
