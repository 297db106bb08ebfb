//! Test modules for the priority channel
//!
//! Tests are organised by functional area: ordering guarantees, capacity
//! and blocking behaviour, the aging sweep, shutdown semantics, and
//! concurrent access.

mod concurrent;
