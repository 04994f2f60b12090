//! In-Memory Row Store Implementation

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{PanelRow, PlaybackStatus, RowError, RowStorePort};

/// 默认最多保留的行数
pub const DEFAULT_MAX_ROWS: usize = 200;

/// 内存行存储
pub struct InMemoryRowStore {
    /// row_id -> (插入序号, 行)
    rows: DashMap<Uuid, (u64, PanelRow)>,
    next_seq: AtomicU64,
    max_rows: usize,
}

impl InMemoryRowStore {
    pub fn new(max_rows: usize) -> Self {
        Self {
            rows: DashMap::new(),
            next_seq: AtomicU64::new(0),
            max_rows: max_rows.max(1),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 超出上限时丢弃最旧的行
    fn evict_oldest(&self) {
        while self.rows.len() > self.max_rows {
            let oldest = self
                .rows
                .iter()
                .min_by_key(|entry| entry.value().0)
                .map(|entry| *entry.key());
            match oldest {
                Some(id) => {
                    self.rows.remove(&id);
                    tracing::debug!(row_id = %id, "Oldest row evicted");
                }
                None => break,
            }
        }
    }
}

impl Default for InMemoryRowStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

impl RowStorePort for InMemoryRowStore {
    fn insert(&self, row: PanelRow) -> Result<Uuid, RowError> {
        let row_id = row.id;
        if self.rows.contains_key(&row_id) {
            return Err(RowError::AlreadyExists(row_id));
        }
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(row_id, (seq, row));
        self.evict_oldest();
        tracing::debug!(row_id = %row_id, "Row added");
        Ok(row_id)
    }

    fn get(&self, id: Uuid) -> Result<PanelRow, RowError> {
        self.rows
            .get(&id)
            .map(|entry| entry.value().1.clone())
            .ok_or(RowError::NotFound(id))
    }

    fn set_status(&self, id: Uuid, status: PlaybackStatus) -> Result<(), RowError> {
        let mut entry = self.rows.get_mut(&id).ok_or(RowError::NotFound(id))?;
        let old_status = entry.1.status;
        entry.1.status = status;
        tracing::debug!(
            row_id = %id,
            old_status = %old_status,
            new_status = %status,
            "Row status changed"
        );
        Ok(())
    }

    fn remove(&self, id: Uuid) -> Result<PanelRow, RowError> {
        self.rows
            .remove(&id)
            .map(|(_, (_, row))| row)
            .ok_or(RowError::NotFound(id))
    }

    fn contains_job(&self, job_id: &str) -> bool {
        self.rows
            .iter()
            .any(|entry| entry.value().1.job_id.as_deref() == Some(job_id))
    }

    fn list(&self) -> Vec<PanelRow> {
        let mut rows: Vec<(u64, PanelRow)> = self
            .rows
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows.into_iter().map(|(_, row)| row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str, job_id: Option<&str>) -> PanelRow {
        PanelRow::new(text, None, job_id.map(str::to_string), "(none)")
    }

    #[test]
    fn test_row_lifecycle() {
        let store = InMemoryRowStore::default();
        let id = store.insert(row("hello", None)).unwrap();

        let fetched = store.get(id).unwrap();
        assert_eq!(fetched.status, PlaybackStatus::Ready);
        assert_eq!(fetched.voice_label(), "(auto)");

        store.set_status(id, PlaybackStatus::Done).unwrap();
        assert_eq!(store.get(id).unwrap().status, PlaybackStatus::Done);

        store.remove(id).unwrap();
        assert!(matches!(store.get(id), Err(RowError::NotFound(_))));
    }

    #[test]
    fn test_list_newest_first() {
        let store = InMemoryRowStore::default();
        store.insert(row("first", None)).unwrap();
        store.insert(row("second", Some("job1"))).unwrap();

        let rows = store.list();
        assert_eq!(rows[0].text, "second");
        assert_eq!(rows[0].status, PlaybackStatus::Queued);
        assert_eq!(rows[1].text, "first");
        assert!(store.contains_job("job1"));
        assert!(!store.contains_job("job2"));
    }

    #[test]
    fn test_oldest_evicted_over_capacity() {
        let store = InMemoryRowStore::new(2);
        store.insert(row("a", None)).unwrap();
        store.insert(row("b", None)).unwrap();
        store.insert(row("c", None)).unwrap();

        let texts: Vec<String> = store.list().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["c", "b"]);
    }

    #[test]
    fn test_set_status_missing_row() {
        let store = InMemoryRowStore::default();
        let result = store.set_status(Uuid::new_v4(), PlaybackStatus::Error);
        assert!(result.is_err());
    }
}
