//! Bounded notification queue and behavior log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{NotificationId, Tick};
use crate::ecology::behavior::BehaviorEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    Info,
    Warning,
    Danger,
    Growth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created: Tick,
}

/// FIFO queue; pushing past capacity evicts the oldest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    pub fn push(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        tick: Tick,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            id,
            kind,
            message: message.into(),
            created: tick,
        });
        id
    }

    /// Remove by id. Returns false if unknown.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.items.iter().position(|n| n.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop notifications older than `ttl` ticks. Returns how many went.
    pub fn expire(&mut self, now: Tick, ttl: u64) -> usize {
        let before = self.items.len();
        self.items.retain(|n| now.saturating_sub(n.created) <= ttl);
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Recent creature actions, oldest evicted first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorLog {
    entries: VecDeque<BehaviorEntry>,
    capacity: usize,
}

impl BehaviorLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: BehaviorEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = BehaviorEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BehaviorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CreatureId;
    use crate::ecology::behavior::ActionKind;
    use crate::ecology::species::SpeciesId;
    use crate::world::hex::HexCoord;

    #[test]
    fn test_queue_evicts_oldest() {
        let mut q = NotificationQueue::new(3);
        for i in 0..5 {
            q.push(NotificationKind::Info, format!("n{}", i), i);
        }
        assert_eq!(q.len(), q.capacity());
        let messages: Vec<&str> = q.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4"]);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut q = NotificationQueue::new(0);
        assert_eq!(q.capacity(), 1);
        q.push(NotificationKind::Info, "a", 0);
        q.push(NotificationKind::Danger, "b", 1);
        assert_eq!(q.len(), 1);
        assert_eq!(q.latest().map(|n| n.kind), Some(NotificationKind::Danger));
    }

    #[test]
    fn test_dismiss() {
        let mut q = NotificationQueue::new(3);
        let id = q.push(NotificationKind::Warning, "careful", 0);
        assert!(q.dismiss(id));
        assert!(!q.dismiss(id));
        assert!(q.is_empty());
    }

    #[test]
    fn test_expire_by_age() {
        let mut q = NotificationQueue::new(5);
        q.push(NotificationKind::Info, "old", 0);
        q.push(NotificationKind::Info, "new", 8);
        assert_eq!(q.expire(10, 6), 1);
        assert_eq!(q.latest().map(|n| n.message.as_str()), Some("new"));
    }

    #[test]
    fn test_behavior_log_bounded() {
        let mut log = BehaviorLog::new(2);
        log.extend((0..4).map(|i| BehaviorEntry {
            tick: i,
            coord: HexCoord::ORIGIN,
            creature: CreatureId(i),
            species: SpeciesId::Lizard,
            action: ActionKind::Wait,
            message: None,
        }));
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().next().map(|e| e.tick), Some(2));
    }
}
