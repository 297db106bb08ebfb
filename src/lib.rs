//! tierq — a bounded, multi-priority, blocking channel with an optional
//! fan-out layer.
//!
//! See [`channel`] for the core priority channel and [`fanout`] for the
//! broadcast registry composed on top of it.

pub mod channel;
pub mod fanout;
