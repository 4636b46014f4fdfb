//! Core types and traits for the Tickler to-do service.
//!
//! This crate holds the [`ToDoItem`] entity and its invariants, the
//! incoming-period windowing rule, and the traits shared by the storage
//! backends, the item service and the HTTP gateway.

pub mod clock;
pub mod error;
pub mod item;
pub mod manager;
pub mod repository;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, ServiceError, StorageError};
pub use item::{CompletionPercentage, ItemId, ToDoItem};
pub use manager::ItemManager;
pub use repository::{ItemRepository, ReadRepository};
pub use window::{incoming_window, IncomingPeriod, IncomingWindow};
