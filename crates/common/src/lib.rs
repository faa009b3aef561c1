//! Common utilities and shared types for enigmatick.
//!
//! This crate provides foundational components used across all enigmatick crates:
//!
//! - **Configuration**: Render and logging settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based local identifiers via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use enigmatick_common::{AppResult, Config, IdGenerator};
//! use validator::Validate;
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!     let id_gen = IdGenerator::new();
//!     println!("{} via {}", id_gen.generate_local_key(), config.render.cache_endpoint);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::{Config, LoggingConfig, RenderConfig};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
