use crate::error::ServiceError;
use crate::item::{ItemId, ToDoItem};
use crate::window::IncomingPeriod;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ServiceError>;

/// Application-level operations on to-do items.
///
/// `add` and `update` store titles and descriptions trimmed; callers apply
/// field changes to the item (via [`ToDoItem::update`]) before calling `update`.
#[async_trait]
pub trait ItemManager: Send + Sync + 'static {
    /// Returns the item with the given id, if any.
    async fn get_by_id(&self, id: &ItemId) -> Result<Option<ToDoItem>>;

    /// Returns every item.
    async fn get_all(&self) -> Result<Vec<ToDoItem>>;

    /// Normalizes and stores a new item, returning its id.
    async fn add(&self, item: ToDoItem) -> Result<ItemId>;

    /// Normalizes and stores a full replacement of an existing item.
    /// Fails with `NotFound` if the item is gone.
    async fn update(&self, item: ToDoItem) -> Result<()>;

    /// Deletes an item. Fails with `NotFound` if it does not exist.
    async fn delete(&self, id: &ItemId) -> Result<()>;

    async fn exists(&self, id: &ItemId) -> Result<bool>;

    /// Sets the completion of an item to 100%.
    async fn mark_as_done(&self, id: &ItemId) -> Result<()>;

    /// Sets the completion of an item, rejecting values outside `0..=100`
    /// before anything is written.
    async fn set_completion_percentage(&self, id: &ItemId, percentage: i64) -> Result<()>;

    /// Returns the items expiring within `period`, soonest first.
    async fn get_incoming(&self, period: IncomingPeriod) -> Result<Vec<ToDoItem>>;

    /// Verifies that the underlying store is reachable.
    async fn ping(&self) -> Result<()>;
}
