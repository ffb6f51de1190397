//! Plotting session.
//!
//! This module provides the main entry point of the crate.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Session`] | Plotting API over the slot connections |
//! | [`SessionBuilder`] | Fluent configuration builder |
//! | [`SessionOptions`] | Serializable session settings |
//! | [`BatchBuffer`] | Deferred value pushes |
//!
//! # Slot State
//!
//! ```text
//! Unconnected ──connect/attach──► Connected ──disconnect──► Unconnected
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for session configuration.
pub mod builder;

/// Batch buffer.
pub mod cache;

/// Core session implementation.
pub mod core;

/// Session settings.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::SessionBuilder;
pub use cache::BatchBuffer;
pub use self::core::Session;
pub use options::SessionOptions;
