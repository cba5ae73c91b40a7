//! Bounded draw history

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::LotteryResult;

/// Most recent results first, oldest dropped past `capacity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawHistory {
    entries: VecDeque<LotteryResult>,
    capacity: usize,
}

impl DrawHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(128)),
            capacity,
        }
    }

    pub fn push(&mut self, result: LotteryResult) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&LotteryResult> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LotteryResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for DrawHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawOutcome, DrawType, PityContext};
    use chrono::Utc;

    fn empty_result(cost: u64) -> LotteryResult {
        let outcome = DrawOutcome {
            pulls: Vec::new(),
            context: PityContext::new(),
        };
        LotteryResult::new(&outcome, DrawType::Single, cost, Utc::now())
    }

    #[test]
    fn test_bounded_newest_first() {
        let mut history = DrawHistory::new(3);
        for cost in 1..=5 {
            history.push(empty_result(cost));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().unwrap().cost(), 5);
        let costs: Vec<u64> = history.iter().map(|r| r.cost()).collect();
        assert_eq!(costs, vec![5, 4, 3]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = DrawHistory::new(0);
        history.push(empty_result(1));
        assert!(history.is_empty());
    }
}
