use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tickler_core::item::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
use tickler_core::{CompletionPercentage, CoreError, ItemId, ToDoItem};

/// Body of `POST /items` and `PUT /items/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItemRequest {
    pub expiration_date: Timestamp,
    pub title: String,
    pub description: String,
}

impl ToDoItemRequest {
    /// Both fields must hold non-whitespace text. Length limits apply to the
    /// raw, untrimmed input.
    pub fn validate(&self) -> Result<(), String> {
        check_text("title", &self.title, TITLE_MAX_CHARS)?;
        check_text("description", &self.description, DESCRIPTION_MAX_CHARS)
    }

    pub fn into_item(self) -> ToDoItem {
        ToDoItem::new(self.expiration_date, self.title, self.description)
    }

    pub fn apply_to(self, item: &mut ToDoItem) {
        item.update(self.expiration_date, self.title, self.description);
    }
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    let chars = value.chars().count();
    if chars > max {
        return Err(format!("{field} must be at most {max} characters, got {chars}"));
    }
    Ok(())
}

/// Body of `PUT /items/{id}/completionPercentage`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCompletionPercentageRequest {
    pub percentage: i64,
}

impl SetCompletionPercentageRequest {
    pub fn validate(&self) -> Result<CompletionPercentage, CoreError> {
        CompletionPercentage::new(self.percentage)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItemResponse {
    pub id: ItemId,
    pub expiration_date: Timestamp,
    pub title: String,
    pub description: String,
    pub completion_percentage: u8,
}

impl From<ToDoItem> for ToDoItemResponse {
    fn from(item: ToDoItem) -> Self {
        Self {
            id: item.id(),
            expiration_date: item.expiration_date(),
            title: item.title().to_string(),
            description: item.description().to_string(),
            completion_percentage: item.completion_percentage().value(),
        }
    }
}

/// Query string of `GET /items/incoming`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingQuery {
    pub period: Option<String>,
}
