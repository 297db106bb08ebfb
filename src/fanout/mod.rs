//! Fan-out Registry Component
//!
//! A broadcast layer composed directly on top of the priority channel:
//! each item `put` on the registry is replicated to every currently
//! registered listener channel.
//!
//! # Overview
//!
//! - **`listen`**: creates a fresh, effectively unbounded
//!   [`PriorityChannel`](crate::channel::PriorityChannel) and returns the
//!   owning handle; the registry keeps only a weak reference
//! - **`put`**: broadcasts a clone of the item to every live listener in
//!   registration order; listeners registered afterwards never see it
//! - **`clean`**: lazily purges listeners that were dropped or shut down;
//!   runs implicitly before every broadcast and listener count
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tierq::fanout::FanoutRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry: FanoutRegistry<String> = FanoutRegistry::new();
//!
//! let events = registry.listen()?;
//! registry.put("deploy-started".to_string()).await?;
//!
//! assert_eq!(events.get().await.as_deref(), Some("deploy-started"));
//! # Ok(())
//! # }
//! ```

mod registry;

pub use registry::FanoutRegistry;
