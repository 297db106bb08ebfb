//! Priority levels and channel configuration
//!
//! This module contains the construction-time configuration for priority
//! channels: the priority newtype with its named levels, the closed range
//! of levels a channel accepts, and the channel configuration struct.
//! Priority bounds are per-channel configuration rather than process-wide
//! constants, so channels with different granularities can coexist.

use std::fmt;
use std::time::Duration;

use crate::channel::error::{ChannelError, ChannelResult};

/// A priority level within a channel's configured range.
///
/// Higher values are served first. The named levels match the conventional
/// four-level scheme; channels configured with a custom [`PriorityRange`]
/// may use any `u8` values inside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u8);

impl Priority {
    /// Background work; the first candidate for aging promotion.
    pub const LOW: Priority = Priority(0);
    /// Default level used when no priority is given.
    pub const NORMAL: Priority = Priority(1);
    pub const HIGH: Priority = Priority(2);
    /// Top level of the default range; never promoted further.
    pub const URGENT: Priority = Priority(3);

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed range of priority levels a channel accepts, plus the default
/// level applied when `put` is called without an explicit priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityRange {
    min: Priority,
    max: Priority,
    default: Priority,
}

impl Default for PriorityRange {
    /// `LOW..=URGENT` with `NORMAL` as the default level.
    fn default() -> Self {
        Self {
            min: Priority::LOW,
            max: Priority::URGENT,
            default: Priority::NORMAL,
        }
    }
}

impl PriorityRange {
    /// Create a custom range. The default level must lie within
    /// `min..=max`.
    pub fn new(min: Priority, max: Priority, default: Priority) -> ChannelResult<Self> {
        if min > max || default < min || default > max {
            return Err(ChannelError::InvalidPriority {
                priority: default.value(),
                min: min.value(),
                max: max.value(),
            });
        }
        Ok(Self { min, max, default })
    }

    pub fn min(&self) -> Priority {
        self.min
    }

    pub fn max(&self) -> Priority {
        self.max
    }

    pub fn default_priority(&self) -> Priority {
        self.default
    }

    pub fn contains(&self, priority: Priority) -> bool {
        priority >= self.min && priority <= self.max
    }

    /// Number of distinct levels in the range.
    pub fn levels(&self) -> usize {
        (self.max.0 - self.min.0) as usize + 1
    }

    /// Bucket index for a priority. Callers must validate the range first.
    pub(crate) fn index_of(&self, priority: Priority) -> usize {
        (priority.0 - self.min.0) as usize
    }

    /// Validate a priority against the range.
    pub(crate) fn check(&self, priority: Priority) -> ChannelResult<()> {
        if self.contains(priority) {
            Ok(())
        } else {
            Err(ChannelError::InvalidPriority {
                priority: priority.value(),
                min: self.min.value(),
                max: self.max.value(),
            })
        }
    }
}

/// Configuration for a [`PriorityChannel`](crate::channel::PriorityChannel).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tierq::channel::ChannelConfig;
///
/// let config = ChannelConfig::new(256).with_aging(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Maximum number of buffered items across all buckets.
    pub capacity: usize,
    /// Accepted priority levels and the default level.
    pub range: PriorityRange,
    /// Anti-starvation promotion interval; `None` disables aging.
    pub aging_interval: Option<Duration>,
}

impl ChannelConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            range: PriorityRange::default(),
            aging_interval: None,
        }
    }

    pub fn with_range(mut self, range: PriorityRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_aging(mut self, interval: Duration) -> Self {
        self.aging_interval = Some(interval);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_levels() {
        let range = PriorityRange::default();

        assert_eq!(range.min(), Priority::LOW);
        assert_eq!(range.max(), Priority::URGENT);
        assert_eq!(range.default_priority(), Priority::NORMAL);
        assert_eq!(range.levels(), 4);
    }

    #[test]
    fn test_range_contains() {
        let range = PriorityRange::default();

        assert!(range.contains(Priority::LOW));
        assert!(range.contains(Priority::URGENT));
        assert!(!range.contains(Priority(4)));
        assert!(!range.contains(Priority(255)));
    }

    #[test]
    fn test_custom_range_indexing() {
        let range = PriorityRange::new(Priority(2), Priority(5), Priority(3)).unwrap();

        assert_eq!(range.levels(), 4);
        assert_eq!(range.index_of(Priority(2)), 0);
        assert_eq!(range.index_of(Priority(5)), 3);
        assert!(!range.contains(Priority(1)));
    }

    #[test]
    fn test_invalid_range_rejected() {
        // min above max
        assert!(PriorityRange::new(Priority(3), Priority(1), Priority(3)).is_err());

        // default outside the range
        match PriorityRange::new(Priority(0), Priority(2), Priority(5)) {
            Err(ChannelError::InvalidPriority { priority, min, max }) => {
                assert_eq!(priority, 5);
                assert_eq!(min, 0);
                assert_eq!(max, 2);
            }
            _ => panic!("Expected InvalidPriority error"),
        }
    }

    #[test]
    fn test_check_reports_bounds() {
        let range = PriorityRange::default();

        assert!(range.check(Priority::NORMAL).is_ok());
        match range.check(Priority(9)) {
            Err(ChannelError::InvalidPriority { priority, min, max }) => {
                assert_eq!(priority, 9);
                assert_eq!(min, 0);
                assert_eq!(max, 3);
            }
            _ => panic!("Expected InvalidPriority error"),
        }
    }
}
