//! liftlog - Personal workout tracker
//!
//! Weekly program, per-exercise set logging, daily body stats and a
//! body-weight trend, all stored locally.

pub mod analytics;
pub mod calendar;
pub mod db;
pub mod exercises;
pub mod session;
pub mod store;
pub mod tui;

pub use db::{Database, KvStore, MemoryStore};
pub use session::Session;
