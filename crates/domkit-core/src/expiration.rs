//! A queue whose entries expire a fixed time after insertion.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::timer::Clock;

/// FIFO of timestamped entries. Expired entries are pruned lazily on query.
pub struct ExpirationQueue<T> {
    clock: Rc<dyn Clock>,
    lifetime: Duration,
    entries: VecDeque<(Duration, T)>,
}

impl<T> ExpirationQueue<T> {
    /// Create a queue whose entries live for `lifetime`.
    pub fn new(clock: Rc<dyn Clock>, lifetime: Duration) -> Self {
        Self {
            clock,
            lifetime,
            entries: VecDeque::new(),
        }
    }

    /// Add an entry stamped with the current time.
    pub fn add(&mut self, element: T) {
        let now = self.clock.now();
        self.entries.push_back((now, element));
    }

    /// Whether any live entry satisfies `pred`.
    pub fn contains_by(&mut self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.prune();
        self.entries.iter().any(|(_, e)| pred(e))
    }

    /// Number of live entries.
    pub fn len(&mut self) -> usize {
        self.prune();
        self.entries.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Drop every entry, expired or not.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn prune(&mut self) {
        let now = self.clock.now();
        while let Some((stamp, _)) = self.entries.front() {
            if *stamp + self.lifetime > now {
                break;
            }
            self.entries.pop_front();
        }
    }
}

impl<T: PartialEq> ExpirationQueue<T> {
    /// Whether a live entry equals `element`.
    pub fn contains(&mut self, element: &T) -> bool {
        self.contains_by(|e| e == element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    #[test]
    fn test_entries_expire_after_lifetime() {
        let clock = Rc::new(ManualScheduler::new());
        let mut queue = ExpirationQueue::new(clock.clone(), Duration::from_millis(1000));

        queue.add(1);
        clock.advance(Duration::from_millis(500));
        queue.add(2);

        assert!(queue.contains(&1));
        assert_eq!(queue.len(), 2);

        clock.advance(Duration::from_millis(500));
        assert!(!queue.contains(&1));
        assert!(queue.contains(&2));

        clock.advance(Duration::from_millis(500));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_contains_by_custom_predicate() {
        let clock = Rc::new(ManualScheduler::new());
        let mut queue = ExpirationQueue::new(clock, Duration::from_secs(1));
        queue.add(10);
        queue.add(20);
        assert!(queue.contains_by(|v| *v > 15));
        assert!(!queue.contains_by(|v| *v > 25));
    }
}
