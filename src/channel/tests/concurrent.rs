//! Tests for concurrent producer/consumer access

#[cfg(test)]
mod tests {
    use crate::channel::{Priority, PriorityChannel};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::task::JoinSet;
    use tokio::time::timeout;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_exactly_once_delivery_under_contention() {
        // Small capacity so producers regularly block on the full channel
        let channel: Arc<PriorityChannel<u64>> = Arc::new(PriorityChannel::new(8).unwrap());

        let producer_count: u64 = 4;
        let items_per_producer: u64 = 50;
        let total = producer_count * items_per_producer;

        let mut producers = JoinSet::new();
        for producer in 0..producer_count {
            let channel = Arc::clone(&channel);
            producers.spawn(async move {
                for item in 0..items_per_producer {
                    let value = producer * items_per_producer + item;
                    channel.put(value).await.unwrap();
                }
            });
        }

        let mut consumers = JoinSet::new();
        for _ in 0..4 {
            let channel = Arc::clone(&channel);
            consumers.spawn(async move {
                let mut received = Vec::new();
                while let Some(value) = channel.get().await {
                    received.push(value);
                }
                received
            });
        }

        timeout(Duration::from_secs(10), async {
            while producers.join_next().await.is_some() {}
        })
        .await
        .expect("producers should finish");

        // Wait for the consumers to drain everything, then release them
        timeout(Duration::from_secs(10), async {
            while channel.size() > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("channel should drain");
        channel.shutdown();

        let mut all_received = Vec::new();
        while let Some(received) = consumers.join_next().await {
            all_received.extend(received.unwrap());
        }

        // Every value delivered exactly once
        assert_eq!(all_received.len() as u64, total);
        let unique: HashSet<u64> = all_received.iter().copied().collect();
        assert_eq!(unique.len() as u64, total);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mixed_priorities() {
        let channel: Arc<PriorityChannel<(u8, u64)>> = Arc::new(PriorityChannel::new(64).unwrap());

        let mut producers = JoinSet::new();
        for (level, priority) in [
            (0u8, Priority::LOW),
            (1, Priority::NORMAL),
            (2, Priority::HIGH),
        ] {
            let channel = Arc::clone(&channel);
            producers.spawn(async move {
                for item in 0..20u64 {
                    channel
                        .put_with_priority((level, item), priority)
                        .await
                        .unwrap();
                }
            });
        }
        while producers.join_next().await.is_some() {}

        // Single consumer: per-priority FIFO order must hold even though
        // producers interleaved arbitrarily
        let mut last_seen = [None::<u64>; 3];
        for _ in 0..60 {
            let (level, item) = channel.get().await.unwrap();
            if let Some(previous) = last_seen[level as usize] {
                assert!(
                    item > previous,
                    "priority {level} delivered {item} after {previous}"
                );
            }
            last_seen[level as usize] = Some(item);
        }

        assert_eq!(channel.size(), 0);
    }
}
