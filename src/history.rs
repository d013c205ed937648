extern crate alloc;
use alloc::collections::VecDeque;
use alloc::string::String;

use rgb::RGB8;

/// One resolved pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub name: String,
    pub rgb: RGB8,
}

/// Append-only log of resolved colors, oldest first.
///
/// Unbounded unless built with [`with_limit`](Self::with_limit), in which case
/// the oldest records are dropped once the limit is reached.
#[derive(Debug, Clone, Default)]
pub struct SelectionHistory {
    records: VecDeque<HistoryRecord>,
    limit: Option<usize>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` records. A limit of 0 means unbounded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: (limit > 0).then_some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn push(&mut self, name: impl Into<String>, rgb: RGB8) {
        if let Some(limit) = self.limit {
            while self.records.len() >= limit {
                self.records.pop_front();
            }
        }
        self.records.push_back(HistoryRecord {
            name: name.into(),
            rgb,
        });
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    /// Up to `n` records, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.records.iter().rev().take(n)
    }

    /// All records in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn names<'a>(it: impl Iterator<Item = &'a HistoryRecord>) -> Vec<&'a str> {
        it.map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn recent_is_most_recent_first() {
        let mut h = SelectionHistory::new();
        assert!(h.latest().is_none());
        h.push("red", RGB8::new(255, 0, 0));
        h.push("green", RGB8::new(0, 255, 0));
        h.push("blue", RGB8::new(0, 0, 255));

        assert_eq!(names(h.recent(2)), ["blue", "green"]);
        assert_eq!(names(h.recent(10)), ["blue", "green", "red"]);
        assert_eq!(names(h.iter()), ["red", "green", "blue"]);
        assert_eq!(h.latest().unwrap().rgb, RGB8::new(0, 0, 255));
    }

    #[test]
    fn unbounded_by_default() {
        let mut h = SelectionHistory::new();
        for i in 0..1000u32 {
            h.push("x", RGB8::new((i % 256) as u8, 0, 0));
        }
        assert_eq!(h.len(), 1000);
        assert_eq!(h.limit(), None);
        assert_eq!(SelectionHistory::with_limit(0).limit(), None);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut h = SelectionHistory::with_limit(2);
        h.push("a", RGB8::new(1, 1, 1));
        h.push("b", RGB8::new(2, 2, 2));
        h.push("c", RGB8::new(3, 3, 3));
        assert_eq!(h.len(), 2);
        assert_eq!(names(h.iter()), ["b", "c"]);

        h.clear();
        assert!(h.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut h = SelectionHistory::new();
        h.push("teal", RGB8::new(0, 128, 128));
        h.push("teal", RGB8::new(0, 128, 128));
        assert_eq!(h.len(), 2);
    }
}
