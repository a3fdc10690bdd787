// Quiz engine library. The CLI front end in main.rs is one possible
// presentation layer; benches and integration tests import the engine via
// `vocadr::engine::*` / `vocadr::session::*`.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod lesson;
pub mod session;
pub mod store;

pub use error::{Error, Result};
