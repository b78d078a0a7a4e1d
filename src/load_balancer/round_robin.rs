//! Round-robin load balancing strategy.

use std::sync::atomic::{AtomicUsize, Ordering};
use crate::load_balancer::{LoadBalancer, entry::ProviderEntry};

/// Round-robin selector.
/// Keeps a process-wide cursor and skips unhealthy entries, wrapping at most
/// once around the registry.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursor: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position. May sit past the end after a removal; it is
    /// wrapped back to the start on the next selection.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }
}

/// First healthy index at or after `cursor`, in rotation order.
fn scan(entries: &[ProviderEntry], cursor: usize) -> Option<usize> {
    let len = entries.len();
    let start = if cursor >= len { 0 } else { cursor };

    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&index| entries[index].is_healthy())
}

impl LoadBalancer for RoundRobin {
    fn next_index(&self, entries: &[ProviderEntry]) -> Option<usize> {
        if entries.is_empty() {
            return None;
        }

        // Callers hold the registry read lock, so `entries` is stable while
        // concurrent readers race on the cursor. Rescan on a lost CAS.
        let mut selected = None;
        let _ = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cursor| {
                selected = scan(entries, cursor);
                selected.map(|index| index + 1)
            });
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::provider::StaticProvider;

    fn entries(n: usize) -> Vec<ProviderEntry> {
        (0..n)
            .map(|i| ProviderEntry::new(Arc::new(StaticProvider::new(format!("p-{}", i)))))
            .collect()
    }

    #[test]
    fn test_round_robin() {
        let lb = RoundRobin::new();
        let entries = entries(3);

        assert_eq!(lb.next_index(&entries), Some(0));
        assert_eq!(lb.next_index(&entries), Some(1));
        assert_eq!(lb.next_index(&entries), Some(2));
        assert_eq!(lb.next_index(&entries), Some(0));
    }

    #[test]
    fn test_skips_unhealthy() {
        let lb = RoundRobin::new();
        let mut entries = entries(3);
        entries[1].mark_failure();

        assert_eq!(lb.next_index(&entries), Some(0));
        assert_eq!(lb.next_index(&entries), Some(2));
        assert_eq!(lb.next_index(&entries), Some(0));
        assert_eq!(lb.cursor(), 1);
    }

    #[test]
    fn test_single_healthy_entry_repeats() {
        let lb = RoundRobin::new();
        let mut entries = entries(3);
        entries[0].mark_failure();
        entries[2].mark_failure();

        for _ in 0..4 {
            assert_eq!(lb.next_index(&entries), Some(1));
        }
    }

    #[test]
    fn test_all_unhealthy_leaves_cursor() {
        let lb = RoundRobin::new();
        let mut entries = entries(2);
        assert_eq!(lb.next_index(&entries), Some(0));

        for e in entries.iter_mut() {
            e.mark_failure();
        }
        assert_eq!(lb.next_index(&entries), None);
        assert_eq!(lb.cursor(), 1);
    }

    #[test]
    fn test_cursor_past_end_restarts_at_zero() {
        let lb = RoundRobin::new();
        let long = entries(5);
        for _ in 0..5 {
            lb.next_index(&long);
        }
        assert_eq!(lb.cursor(), 5);

        // Registry shrank underneath the cursor
        let short = entries(3);
        assert_eq!(lb.next_index(&short), Some(0));
        assert_eq!(lb.next_index(&short), Some(1));
    }

    #[test]
    fn test_empty() {
        let lb = RoundRobin::new();
        assert_eq!(lb.next_index(&[]), None);
    }
}
