//! Common utilities and shared types for naijafix-rs.
//!
//! This crate provides foundational components used across all naijafix-rs crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based report identifiers via [`IdGenerator`]
//! - **Region data**: static Nigerian state/LGA lookup tables in [`nigeria`]
//!
//! # Example
//!
//! ```no_run
//! use naijafix_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod nigeria;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::{IdGenerator, validate_id};
