//! Browser helpers and small data structures.
//!
//! Provides:
//! - [`RingBuffer`] - Bounded scrollback storage
//! - [`RepeatingTask`] - Cancellable interval driving special modes
//! - [`console`] - Console logging, silent off the browser
//! - [`dom`] - localStorage, reload and focus helpers

pub mod console;
pub mod dom;
mod ring_buffer;
mod scheduler;

pub use ring_buffer::RingBuffer;
pub use scheduler::{RepeatingTask, run_after};
