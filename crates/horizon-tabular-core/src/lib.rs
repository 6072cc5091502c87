//! Core systems for Horizon Tabular.
//!
//! This crate provides the reactive plumbing that the tabular view engine is
//! built on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Values with change detection
//! - **Memo Cells**: Keyed caches for derived values
//! - **Logging**: `tracing` targets and performance spans
//!
//! Everything here is synchronous. Slots run on the emitting thread before
//! `emit` returns.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_tabular_core::Signal;
//!
//! let page_changed = Signal::<usize>::new();
//!
//! let conn_id = page_changed.connect(|page| {
//!     println!("Now on page {}", page);
//! });
//!
//! page_changed.emit(2);
//! page_changed.disconnect(conn_id);
//! ```
//!
//! # Memo Example
//!
//! ```
//! use horizon_tabular_core::Memo;
//!
//! let squares = Memo::<u64, u64>::new();
//! assert_eq!(squares.get_or_compute(&4, || 16), 16);
//! // Same key: the closure is not called again.
//! assert_eq!(squares.get_or_compute(&4, || unreachable!()), 16);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Memo, Property};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
