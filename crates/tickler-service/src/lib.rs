//! Item service implementation.
//!
//! [`ItemService`] implements [`tickler_core::ItemManager`] on top of any
//! [`tickler_core::ItemRepository`], adding normalization, the completion
//! range check and the incoming-period window.

pub mod service;

pub use service::ItemService;
