//! logdog-app - Application state and view engine for logdog
//!
//! Implements the TEA (The Elm Architecture) pattern: [`AppState`] is the
//! model, [`handler::update`] the update function. Besides the handlers it
//! holds the pieces the view is computed from:
//!
//! - [`store`]: retained entries with stable ids
//! - [`filter`]: the severity floor and regex filters deciding visibility
//! - [`render`]: the incremental render cache
//! - [`selection`]: highlight and anchored range selection
//! - [`config`]: preferences persisted between runs

pub mod config;
pub mod filter;
pub mod format;
pub mod handler;
pub mod input_key;
pub mod log_view_state;
pub mod message;
pub mod process;
pub mod redraw;
pub mod render;
pub mod selection;
pub mod signals;
pub mod state;
pub mod store;

// Re-export primary types
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use process::process_message;
pub use state::AppState;
