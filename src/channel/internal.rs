//! Core bounded priority channel implementation
//!
//! This module provides the blocking channel built on the bucket store:
//! two counting semaphores ("free capacity" held down by producers,
//! "available items" held down by consumers) around a mutex-guarded
//! [`BucketStore`], plus the explicit closed flag consulted by `get` and
//! the amortised trigger for the aging sweep.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;

use crate::channel::buckets::{BucketStore, Slot};
use crate::channel::config::{ChannelConfig, Priority, PriorityRange};
use crate::channel::error::{ChannelError, ChannelResult};

/// Largest capacity a channel can be created with.
///
/// Passing this to [`PriorityChannel::new`] yields an effectively
/// unbounded channel. It is the permit ceiling of the underlying
/// semaphores; callers opt into it explicitly rather than receiving an
/// implicit magic default.
pub const MAX_CAPACITY: usize = Semaphore::MAX_PERMITS;

/// Aging trigger state; the sweep itself lives in the bucket store.
#[derive(Debug)]
struct AgingState {
    interval: Duration,
    /// Next time a `put` call runs the sweep. Amortises the O(capacity)
    /// scan across many enqueues.
    next_check: Instant,
}

#[derive(Debug)]
struct ChannelState<T> {
    buckets: BucketStore<T>,
    aging: Option<AgingState>,
    closed: bool,
}

/// Bounded, blocking, multi-priority channel.
///
/// `put` blocks while the channel is full, `get` blocks while it is empty,
/// and neither busy-waits. Among items of equal priority delivery order is
/// enqueue order; across priorities the highest non-empty bucket wins.
/// With an aging interval configured, items that wait past the interval
/// are promoted one level per sweep so a stream of high-priority arrivals
/// cannot starve them forever.
///
/// # Thread Safety
///
/// All methods take `&self`; share the channel across tasks or threads
/// with `Arc<PriorityChannel<T>>`. Exactly-once dequeue is guaranteed for
/// any number of concurrent producers and consumers.
///
/// # Example
///
/// ```rust,no_run
/// use tierq::channel::{Priority, PriorityChannel};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let channel: PriorityChannel<String> = PriorityChannel::new(64)?;
///
/// channel.put("routine".to_string()).await?;
/// channel
///     .put_with_priority("urgent".to_string(), Priority::URGENT)
///     .await?;
///
/// // Highest bucket first
/// assert_eq!(channel.get().await.as_deref(), Some("urgent"));
/// assert_eq!(channel.get().await.as_deref(), Some("routine"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PriorityChannel<T> {
    capacity: usize,
    range: PriorityRange,
    /// Counts queued items; consumers block here. Closed on shutdown so
    /// waiting and future consumers wake instead of blocking forever.
    available: Semaphore,
    /// Counts remaining capacity; producers block here. Never closed:
    /// shutdown only affects consumers.
    free: Semaphore,
    state: Mutex<ChannelState<T>>,
}

impl<T> PriorityChannel<T> {
    /// Create a channel with the default priority range and no aging.
    ///
    /// Capacity must be positive and at most [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> ChannelResult<Self> {
        Self::with_config(ChannelConfig::new(capacity))
    }

    /// Create a channel from an explicit configuration.
    pub fn with_config(config: ChannelConfig) -> ChannelResult<Self> {
        if config.capacity == 0 || config.capacity > MAX_CAPACITY {
            return Err(ChannelError::InvalidCapacity {
                capacity: config.capacity,
                max_capacity: MAX_CAPACITY,
            });
        }

        let aging = config.aging_interval.map(|interval| AgingState {
            interval,
            next_check: Instant::now() + interval,
        });

        Ok(Self {
            capacity: config.capacity,
            range: config.range,
            available: Semaphore::new(0),
            free: Semaphore::new(config.capacity),
            state: Mutex::new(ChannelState {
                buckets: BucketStore::new(config.range),
                aging,
                closed: false,
            }),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn range(&self) -> PriorityRange {
        self.range
    }

    /// Enqueue an item at the range's default priority.
    ///
    /// Blocks while the channel is full. See
    /// [`put_with_priority`](Self::put_with_priority).
    pub async fn put(&self, item: T) -> ChannelResult<()> {
        self.put_with_priority(item, self.range.default_priority())
            .await
    }

    /// Enqueue an item at an explicit priority.
    ///
    /// Blocks while the channel is full, runs the aging sweep first when
    /// it is due, then appends the item to its bucket. Succeeds even after
    /// [`shutdown`](Self::shutdown) — closing only affects consumers.
    ///
    /// Fails with [`ChannelError::InvalidPriority`] for a priority outside
    /// the configured range, without mutating any state.
    pub async fn put_with_priority(&self, item: T, priority: Priority) -> ChannelResult<()> {
        self.range.check(priority)?;

        // Blocks until a slot frees up. The free semaphore is never
        // closed, so this cannot fail.
        self.free
            .acquire()
            .await
            .expect("free-capacity semaphore is never closed")
            .forget();

        {
            let mut guard = self.state.lock().unwrap();
            let state = &mut *guard;
            let now = Instant::now();

            let mut expires_at = None;
            if let Some(aging) = state.aging.as_mut() {
                if now >= aging.next_check {
                    let promoted = state.buckets.promote_expired(now, aging.interval);
                    if promoted > 0 {
                        log::trace!("aging sweep promoted {promoted} item(s)");
                    }
                    aging.next_check = now + aging.interval;
                }
                expires_at = Some(now + aging.interval);
            }

            state.buckets.push(priority, Slot { item, expires_at });
        }

        self.available.add_permits(1);
        Ok(())
    }

    /// Dequeue the front item of the highest non-empty bucket.
    ///
    /// Blocks while the channel is empty and not shut down. Returns `None`
    /// — the closed sentinel — once the channel has been shut down *and*
    /// the buffered backlog is drained; buffered items are always handed
    /// out first.
    pub async fn get(&self) -> Option<T> {
        match self.available.acquire().await {
            Ok(permit) => permit.forget(),
            // Semaphore closed by shutdown; late and woken consumers
            // drain the backlog directly under the state lock.
            Err(_) => {}
        }
        self.take_next()
    }

    fn take_next(&self) -> Option<T> {
        let slot = self.state.lock().unwrap().buckets.pop_highest()?;
        self.free.add_permits(1);
        Some(slot.item)
    }

    /// Total number of queued items. Non-blocking.
    pub fn size(&self) -> usize {
        self.state.lock().unwrap().buckets.len()
    }

    /// Number of queued items at or above `min_priority`. Non-blocking.
    ///
    /// Lets a consumer notice that higher-priority work has arrived
    /// without consuming it.
    pub fn size_from(&self, min_priority: Priority) -> usize {
        self.state.lock().unwrap().buckets.count_from(min_priority)
    }

    /// Release all blocked and future `get` calls.
    ///
    /// Idempotent. Buffered items stay in place and are handed out until
    /// drained; only then does `get` report the closed sentinel. Producers
    /// are unaffected and may keep calling `put`; callers wanting the
    /// in-flight data must still drain the channel.
    pub fn shutdown(&self) {
        {
            let mut state = self.state.lock().unwrap();
            if state.closed {
                return;
            }
            state.closed = true;
        }
        self.available.close();
        log::debug!("priority channel shut down");
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}
