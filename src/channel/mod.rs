//! Priority Channel Component
//!
//! A bounded, blocking, multi-priority channel for concurrent
//! producer/consumer code.
//!
//! # Overview
//!
//! Items are stored in one FIFO bucket per priority level and consumed
//! highest-bucket-first. Key features include:
//!
//! - **Bounded + blocking**: `put` blocks while the channel is full,
//!   `get` blocks while it is empty; neither busy-waits
//! - **Priority buckets**: strict FIFO within a level, highest level
//!   served first
//! - **Anti-starvation aging**: items waiting past a configured interval
//!   are promoted one level per sweep, amortised across `put` calls
//! - **Deterministic shutdown**: `shutdown` wakes every blocked consumer;
//!   the backlog drains before `get` reports the closed sentinel
//! - **Per-channel configuration**: priority bounds and the default level
//!   are construction-time configuration, not process-wide constants
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ put                │ put                │ put
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 PriorityChannel (bounded)               │
//! │   free ─────────────── blocking counters ─── available  │
//! │  ┌────────────────────────────────────────────────┐    │
//! │  │ URGENT │ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ┌───┐      │    │
//! │  │ HIGH   │ ┌───┬───┐                  │ ▲ │aging │    │
//! │  │ NORMAL │ ├───┼───┼───┐              │ │ │sweep │    │
//! │  │ LOW    │ ├───┤   └───┘              └───┘      │    │
//! │  └────────────────────────────────────────────────┘    │
//! └───────────────────────────┬─────────────────────────────┘
//!                             │ get (highest bucket first)
//!              ┌──────────────┼──────────────┐
//!        ┌─────┴─────┐  ┌─────┴─────┐  ┌─────┴─────┐
//!        │Consumer A │  │Consumer B │  │Consumer C │
//!        └───────────┘  └───────────┘  └───────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tierq::channel::{Priority, PriorityChannel};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let channel = Arc::new(PriorityChannel::new(1024)?);
//!
//! // Producer side
//! channel.put("background refresh".to_string()).await?;
//! channel
//!     .put_with_priority("page the operator".to_string(), Priority::URGENT)
//!     .await?;
//!
//! // Consumer side: urgent work first, closed sentinel after shutdown
//! while let Some(task) = channel.get().await {
//!     println!("working on: {task}");
//! }
//! # Ok(())
//! # }
//! ```

mod buckets;
mod config;
mod error;
mod internal;

pub use config::{ChannelConfig, Priority, PriorityRange};
pub use error::{ChannelError, ChannelResult};
pub use internal::{PriorityChannel, MAX_CAPACITY};

#[cfg(test)]
mod tests;
