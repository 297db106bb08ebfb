//! Fan-out registry implementation
//!
//! The registry hands out listener channels via `listen` and keeps only a
//! weak reference to each, so dropping the handle (or shutting the
//! listener down) is all a consumer needs to do to leave the broadcast.
//! Dead entries are purged lazily by `clean`, which also runs ahead of
//! every broadcast and listener count.

use std::sync::{Arc, Mutex, Weak};

use crate::channel::{
    ChannelConfig, ChannelResult, Priority, PriorityChannel, PriorityRange, MAX_CAPACITY,
};

/// Broadcaster replicating each item to every registered listener channel.
///
/// Listeners are independent [`PriorityChannel`]s created by
/// [`listen`](Self::listen) with the registry's priority range and an
/// effectively unbounded capacity, so a broadcast never blocks behind one
/// slow consumer. The registry holds only `Weak` references: a listener
/// whose handle has been dropped, or whose channel has been shut down,
/// stops receiving and is purged by the next `clean`, `put`, or listener
/// count.
///
/// Each broadcast clones the item once per listener; callers that want
/// reference sharing across listeners enqueue `Arc<...>` payloads.
///
/// # Example
///
/// ```rust,no_run
/// use tierq::fanout::FanoutRegistry;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let registry: FanoutRegistry<u32> = FanoutRegistry::new();
///
/// let listener_a = registry.listen()?;
/// let listener_b = registry.listen()?;
///
/// registry.put(42).await?;
///
/// assert_eq!(listener_a.get().await, Some(42));
/// assert_eq!(listener_b.get().await, Some(42));
/// # Ok(())
/// # }
/// ```
pub struct FanoutRegistry<T> {
    range: PriorityRange,
    listeners: Mutex<Vec<Weak<PriorityChannel<T>>>>,
}

impl<T> FanoutRegistry<T> {
    /// Create an empty registry with the default priority range.
    pub fn new() -> Self {
        Self::with_range(PriorityRange::default())
    }

    /// Create an empty registry whose listeners use a custom range.
    pub fn with_range(range: PriorityRange) -> Self {
        Self {
            range,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn range(&self) -> PriorityRange {
        self.range
    }

    /// Create, register, and return a new listener channel.
    ///
    /// The returned handle owns the channel; the registry keeps only a
    /// weak reference. A listener only sees items broadcast after it was
    /// registered — there is no replay.
    pub fn listen(&self) -> ChannelResult<Arc<PriorityChannel<T>>> {
        let channel = Arc::new(PriorityChannel::with_config(
            ChannelConfig::new(MAX_CAPACITY).with_range(self.range),
        )?);

        let mut listeners = self.listeners.lock().unwrap();
        listeners.push(Arc::downgrade(&channel));
        log::trace!("registered fan-out listener ({} total)", listeners.len());

        Ok(channel)
    }

    /// Purge listeners whose handle was dropped or whose channel was shut
    /// down. Idempotent; side-effect-free when there is nothing to remove.
    pub fn clean(&self) {
        let mut listeners = self.listeners.lock().unwrap();
        let before = listeners.len();
        listeners.retain(|weak| match weak.upgrade() {
            Some(channel) => !channel.is_closed(),
            None => false,
        });

        let purged = before - listeners.len();
        if purged > 0 {
            log::trace!("purged {purged} dead fan-out listener(s)");
        }
    }

    /// Number of live listeners, after an implicit [`clean`](Self::clean).
    pub fn number_of_listeners(&self) -> usize {
        self.clean();
        self.listeners.lock().unwrap().len()
    }
}

impl<T: Clone> FanoutRegistry<T> {
    /// Broadcast an item at the range's default priority.
    pub async fn put(&self, item: T) -> ChannelResult<()> {
        self.put_with_priority(item, self.range.default_priority())
            .await
    }

    /// Broadcast an item to every live listener, in registration order.
    ///
    /// Runs [`clean`](Self::clean) first. Delivery is best-effort across
    /// listeners: one that becomes invalid concurrently with the
    /// broadcast may or may not receive the item.
    pub async fn put_with_priority(&self, item: T, priority: Priority) -> ChannelResult<()> {
        self.range.check(priority)?;
        self.clean();

        let live: Vec<Arc<PriorityChannel<T>>> = {
            let listeners = self.listeners.lock().unwrap();
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in live {
            listener.put_with_priority(item.clone(), priority).await?;
        }
        Ok(())
    }
}

impl<T> Default for FanoutRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
