mod health;
mod item;

pub use health::HealthResponse;
pub use item::{IncomingQuery, SetCompletionPercentageRequest, ToDoItemRequest, ToDoItemResponse};
