use async_trait::async_trait;
use std::sync::Arc;
use tickler_core::{
    incoming_window, Clock, IncomingPeriod, ItemId, ItemManager, ItemRepository, ServiceError,
    SystemClock, ToDoItem,
};
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, ServiceError>;

/// A concrete implementation of the `ItemManager` trait.
///
/// This service wraps an `ItemRepository` and a `Clock` to handle:
/// - Trimming titles and descriptions before they are stored
/// - Completion percentage changes, validated before any write
/// - Incoming-period lookups relative to the clock's current time
///
/// Storage errors are passed through unchanged. Mutations of a missing item
/// report `NotFound` instead of relying on a separate existence check.
#[derive(Debug)]
pub struct ItemService<R, C = SystemClock> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ItemService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    /// Creates a new `ItemService` reading time from the system clock.
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, SystemClock)
    }
}

impl<R: ItemRepository, C: Clock> ItemService<R, C> {
    /// Creates a new `ItemService` with a custom clock.
    pub fn with_clock(repository: R, clock: C) -> Self {
        Self {
            repository: Arc::new(repository),
            clock: Arc::new(clock),
        }
    }

    /// Loads an item, turning absence into `NotFound`.
    async fn load(&self, id: &ItemId) -> Result<ToDoItem> {
        self.repository
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(*id))
    }

    /// Writes back an item that was loaded earlier.
    async fn store(&self, item: ToDoItem) -> Result<()> {
        let id = item.id();
        if !self.repository.update(item).await? {
            debug!(item_id = %id, "item vanished before update");
            return Err(ServiceError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: ItemRepository, C: Clock> ItemManager for ItemService<R, C> {
    async fn get_by_id(&self, id: &ItemId) -> Result<Option<ToDoItem>> {
        trace!(item_id = %id, "fetching item");
        Ok(self.repository.get(id).await?)
    }

    async fn get_all(&self) -> Result<Vec<ToDoItem>> {
        Ok(self.repository.get_all().await?)
    }

    async fn add(&self, mut item: ToDoItem) -> Result<ItemId> {
        item.normalize();
        let id = self.repository.insert(item).await?;
        debug!(item_id = %id, "item added");
        Ok(id)
    }

    async fn update(&self, mut item: ToDoItem) -> Result<()> {
        item.normalize();
        let id = item.id();
        self.store(item).await?;
        debug!(item_id = %id, "item updated");
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(ServiceError::NotFound(*id));
        }
        debug!(item_id = %id, "item deleted");
        Ok(())
    }

    async fn exists(&self, id: &ItemId) -> Result<bool> {
        Ok(self.repository.exists(id).await?)
    }

    async fn mark_as_done(&self, id: &ItemId) -> Result<()> {
        let mut item = self.load(id).await?;
        item.mark_as_done();
        self.store(item).await?;
        debug!(item_id = %id, "item marked as done");
        Ok(())
    }

    async fn set_completion_percentage(&self, id: &ItemId, percentage: i64) -> Result<()> {
        let mut item = self.load(id).await?;
        item.set_completion_percentage(percentage)?;
        self.store(item).await?;
        debug!(item_id = %id, percentage, "completion percentage set");
        Ok(())
    }

    async fn get_incoming(&self, period: IncomingPeriod) -> Result<Vec<ToDoItem>> {
        let window = incoming_window(period, self.clock.now())?;
        trace!(%period, start = %window.start, end = %window.end, "querying incoming items");
        Ok(self
            .repository
            .get_by_expiration_range(window.start, window.end)
            .await?)
    }

    async fn ping(&self) -> Result<()> {
        Ok(self.repository.ping().await?)
    }
}
