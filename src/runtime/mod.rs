//! Runtime module - event loop and side effects
//!
//! - `app` - owns the model, the view synchronizer and the status indicator,
//!   and processes one message at a time from an mpsc channel

pub mod app;

pub use app::App;
