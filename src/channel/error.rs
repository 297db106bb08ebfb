//! Channel Error Types

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Priority {priority} outside configured range {min}..={max}")]
    InvalidPriority { priority: u8, min: u8, max: u8 },

    #[error("Capacity must be between 1 and {max_capacity} (got {capacity})")]
    InvalidCapacity {
        capacity: usize,
        max_capacity: usize,
    },
}

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;
