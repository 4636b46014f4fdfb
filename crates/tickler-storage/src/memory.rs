use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use tickler_core::error::StorageError;
use tickler_core::repository::{ItemRepository, ReadRepository, Result};
use tickler_core::{ItemId, ToDoItem};

/// In-memory implementation of the repository contract using DashMap.
///
/// DashMap shards its locks, so writers to different items do not block
/// each other.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<ItemId, ToDoItem>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, id: &ItemId) -> Result<Option<ToDoItem>> {
        Ok(self.storage.get(id).map(|entry| entry.value().clone()))
    }

    async fn get_all(&self) -> Result<Vec<ToDoItem>> {
        Ok(self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn exists(&self, id: &ItemId) -> Result<bool> {
        Ok(self.storage.contains_key(id))
    }

    async fn get_by_expiration_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ToDoItem>> {
        let mut items: Vec<ToDoItem> = self
            .storage
            .iter()
            .filter(|entry| {
                let at = entry.expiration_date();
                start <= at && at < end
            })
            .map(|entry| entry.value().clone())
            .collect();

        items.sort_by_key(ToDoItem::expiration_date);
        Ok(items)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn insert(&self, item: ToDoItem) -> Result<ItemId> {
        let id = item.id();
        match self.storage.entry(id) {
            Entry::Occupied(_) => Err(StorageError::Conflict(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(item);
                Ok(id)
            }
        }
    }

    async fn update(&self, item: ToDoItem) -> Result<bool> {
        let Some(mut stored) = self.storage.get_mut(&item.id()) else {
            return Ok(false);
        };
        *stored = item;
        Ok(true)
    }

    async fn delete(&self, id: &ItemId) -> Result<bool> {
        Ok(self.storage.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;
    use std::sync::Arc;

    fn at(hours: i64) -> Timestamp {
        Timestamp::UNIX_EPOCH + SignedDuration::from_hours(hours)
    }

    fn item(title: &str, hours: i64) -> ToDoItem {
        ToDoItem::new(at(hours), title, "description")
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();
        let original = item("write tests", 1);

        let id = repo.insert(original.clone()).await.unwrap();

        assert_eq!(id, original.id());
        let got = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(got, original);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();
        assert!(repo.get(&ItemId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_conflict() {
        let repo = InMemoryRepository::new();
        let original = item("once", 1);

        repo.insert(original.clone()).await.unwrap();
        let err = repo.insert(original).await.unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_replaces_existing() {
        let repo = InMemoryRepository::new();
        let mut stored = item("before", 1);
        repo.insert(stored.clone()).await.unwrap();

        stored.update(at(2), "after", "changed");
        stored.mark_as_done();
        assert!(repo.update(stored.clone()).await.unwrap());

        let got = repo.get(&stored.id()).await.unwrap().unwrap();
        assert_eq!(got.title(), "after");
        assert_eq!(got.completion_percentage().value(), 100);
    }

    #[tokio::test]
    async fn update_missing_returns_false() {
        let repo = InMemoryRepository::new();
        assert!(!repo.update(item("ghost", 1)).await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn delete_existing() {
        let repo = InMemoryRepository::new();
        let id = repo.insert(item("to delete", 1)).await.unwrap();

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.exists(&id).await.unwrap());
        assert!(repo.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let repo = InMemoryRepository::new();
        assert!(!repo.delete(&ItemId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn exists_checks() {
        let repo = InMemoryRepository::new();
        let stored = item("present", 1);

        assert!(!repo.exists(&stored.id()).await.unwrap());
        repo.insert(stored.clone()).await.unwrap();
        assert!(repo.exists(&stored.id()).await.unwrap());
    }

    #[tokio::test]
    async fn get_all_returns_everything() {
        let repo = InMemoryRepository::with_capacity(3);
        for hours in 0..3 {
            repo.insert(item("any", hours)).await.unwrap();
        }

        assert_eq!(repo.get_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn expiration_range_is_half_open_and_sorted() {
        let repo = InMemoryRepository::new();
        for (title, hours) in [
            ("late", 5),
            ("start", 2),
            ("end", 6),
            ("early", 1),
            ("mid", 3),
        ] {
            repo.insert(item(title, hours)).await.unwrap();
        }

        let found = repo.get_by_expiration_range(at(2), at(6)).await.unwrap();
        let titles: Vec<&str> = found.iter().map(ToDoItem::title).collect();

        assert_eq!(titles, vec!["start", "mid", "late"]);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10i64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(item(&format!("item-{i:03}"), i)).await.unwrap()
            }));
        }

        let mut ids = vec![];
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        for id in ids {
            assert!(repo.get(&id).await.unwrap().is_some());
        }
        assert_eq!(repo.len(), 10);
    }
}
