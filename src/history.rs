/// Number of entries shown in the history panel.
pub const HISTORY_DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: String,
    pub task: String,
    pub output: String,
}

/// Append-only record of successful submissions for the current session.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Up to `limit` newest entries, newest first, paired with their
    /// 1-based submission number.
    pub fn recent(&self, limit: usize) -> Vec<(usize, &HistoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .take(limit)
            .map(|(i, entry)| (i + 1, entry))
            .collect()
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

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            role: format!("role {n}"),
            task: format!("task {n}"),
            output: format!("output {n}"),
        }
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut store = HistoryStore::new();
        store.append(entry(1));
        store.append(entry(1));
        store.append(entry(2));

        assert_eq!(store.len(), 3);
        assert_eq!(store.all()[0], entry(1));
        assert_eq!(store.all()[1], entry(1));
        assert_eq!(store.all()[2], entry(2));
    }

    #[test]
    fn recent_is_newest_first_and_capped() {
        let mut store = HistoryStore::new();
        for n in 1..=13 {
            store.append(entry(n));
        }

        let recent = store.recent(HISTORY_DISPLAY_LIMIT);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].0, 13);
        assert_eq!(recent[0].1, &entry(13));
        assert_eq!(recent[9].0, 4);
        assert_eq!(recent[9].1, &entry(4));
        // storage itself is not truncated
        assert_eq!(store.all().len(), 13);
    }

    #[test]
    fn recent_on_short_history_returns_everything() {
        let mut store = HistoryStore::new();
        assert!(store.recent(HISTORY_DISPLAY_LIMIT).is_empty());
        store.append(entry(1));
        store.append(entry(2));
        let numbers: Vec<usize> = store.recent(HISTORY_DISPLAY_LIMIT).iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![2, 1]);
    }
}
