//! # logdog-core - Core Domain Types
//!
//! Foundation crate for logdog. Provides the parsed log entry model, the
//! logcat line parser, error handling and logging setup.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LogEntry`] - One parsed logcat line
//! - [`Severity`] - Ordered priority with an `Unknown` sentinel on top
//! - [`EntryId`] - Stable identifier assigned by the entry store
//! - [`TailSize`] - History replay request for a new stream
//! - [`StreamEvent`], [`StreamStatus`] - What the stream manager reports
//!
//! ### Parsing (`parser`)
//! - [`parse_line()`] - Total parser for `threadtime` lines
//! - [`is_continuation()`] - Stack-trace continuation rule
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use logdog_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod parser;
pub mod prelude;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use parser::{continues, is_continuation, is_stack_trace_line, parse_line};
pub use types::{EntryId, LogEntry, Severity, StreamEvent, StreamStatus, TailSize};
