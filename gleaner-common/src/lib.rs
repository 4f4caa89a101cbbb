//! Shared building blocks for the gleaner workspace.
//!
//! Kept deliberately small so every other crate can depend on it:
//!
//! - [`observability`]: one-shot `tracing` initialisation for binaries and tests
//! - [`Pacer`]: a random "polite" delay awaited between upstream requests
//!
//! # Examples
//!
//! ```rust
//! use gleaner_common::Pacer;
//! use std::time::Duration;
//!
//! let pacer = Pacer::from_millis(200, 1200);
//! let d = pacer.pick();
//! assert!(d >= Duration::from_millis(200) && d <= Duration::from_millis(1200));
//! ```
pub mod observability;
mod pace;

pub use pace::Pacer;
