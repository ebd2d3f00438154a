//! Bounded blocking FIFO for composite readings.
//!
//! Fixed-capacity queue over a `heapless::Deque` with condvar-based
//! blocking on both sides: the producer blocks while the queue is full
//! (back-pressure, no drop policy) and the consumer blocks while it is
//! empty. No heap allocation after construction.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Capacity of the acquisition → sink reading queue.
pub const READING_QUEUE_CAPACITY: usize = 10;

/// Fixed-capacity multi-producer blocking queue.
pub struct BoundedQueue<T, const N: usize> {
    items: Mutex<heapless::Deque<T, N>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T, const N: usize> BoundedQueue<T, N> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(heapless::Deque::new()),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, heapless::Deque<T, N>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push an item, blocking indefinitely while the queue is full.
    pub fn push(&self, mut item: T) {
        let mut items = self.lock();
        loop {
            match items.push_back(item) {
                Ok(()) => {
                    self.not_empty.notify_one();
                    return;
                }
                Err(rejected) => {
                    item = rejected;
                    items = self
                        .not_full
                        .wait(items)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
    }

    /// Push without blocking. Returns the item back if the queue is full.
    pub fn try_push(&self, item: T) -> Result<(), T> {
        let mut items = self.lock();
        items.push_back(item).map(|()| self.not_empty.notify_one())
    }

    /// Pop the oldest item, blocking indefinitely while the queue is empty.
    pub fn pop(&self) -> T {
        let mut items = self.lock();
        loop {
            if let Some(item) = items.pop_front() {
                self.not_full.notify_one();
                return item;
            }
            items = self
                .not_empty
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Pop without blocking.
    pub fn try_pop(&self) -> Option<T> {
        let mut items = self.lock();
        let item = items.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<T, const N: usize> Default for BoundedQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn fifo_order_preserved() {
        let q: BoundedQueue<u32, 4> = BoundedQueue::new();
        q.push(1);
        q.push(2);
        q.push(3);
        assert_eq!(q.pop(), 1);
        assert_eq!(q.pop(), 2);
        assert_eq!(q.pop(), 3);
    }

    #[test]
    fn try_push_reports_full() {
        let q: BoundedQueue<u8, 2> = BoundedQueue::new();
        assert!(q.try_push(1).is_ok());
        assert!(q.try_push(2).is_ok());
        assert_eq!(q.try_push(3), Err(3));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn producer_blocks_until_consumer_drains() {
        let q: Arc<BoundedQueue<u8, 2>> = Arc::new(BoundedQueue::new());
        q.push(1);
        q.push(2);

        let producer = Arc::clone(&q);
        let h = thread::spawn(move || {
            // Queue is full: this blocks until the main thread pops.
            producer.push(3);
        });

        thread::sleep(Duration::from_millis(30));
        assert_eq!(q.len(), 2, "producer must not overrun capacity");
        assert_eq!(q.pop(), 1);
        h.join().unwrap();
        assert_eq!(q.pop(), 2);
        assert_eq!(q.pop(), 3);
    }

    #[test]
    fn consumer_blocks_until_item_arrives() {
        let q: Arc<BoundedQueue<u8, 2>> = Arc::new(BoundedQueue::new());
        let consumer = Arc::clone(&q);
        let h = thread::spawn(move || consumer.pop());
        thread::sleep(Duration::from_millis(20));
        q.push(42);
        assert_eq!(h.join().unwrap(), 42);
    }
}
