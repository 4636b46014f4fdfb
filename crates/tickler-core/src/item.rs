use crate::error::CoreError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum number of characters accepted for a title.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum number of characters accepted for a description.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Opaque identifier of a [`ToDoItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ItemId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| CoreError::InvalidItemId(format!("'{s}': {e}")))
    }
}

/// A completion ratio in whole percent, always within `0..=100`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct CompletionPercentage(u8);

impl CompletionPercentage {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Validates `value` against the `0..=100` range.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if !(0..=100).contains(&value) {
            return Err(CoreError::PercentageOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for CompletionPercentage {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompletionPercentage> for u8 {
    fn from(value: CompletionPercentage) -> Self {
        value.0
    }
}

impl Display for CompletionPercentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A to-do item.
///
/// Fields can only be changed through the named transition methods, which
/// keeps the identifier fixed and the completion percentage in range.
#[derive(Debug, Clone, PartialEq)]
pub struct ToDoItem {
    id: ItemId,
    expiration_date: Timestamp,
    title: String,
    description: String,
    completion_percentage: CompletionPercentage,
}

impl ToDoItem {
    /// Creates a new item with a fresh identifier and 0% completion.
    pub fn new(
        expiration_date: Timestamp,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            expiration_date,
            title: title.into(),
            description: description.into(),
            completion_percentage: CompletionPercentage::MIN,
        }
    }

    /// Rebuilds an item from previously persisted values.
    ///
    /// Intended for storage backends. The percentage is re-validated so a
    /// corrupted row can never produce an out-of-range entity.
    pub fn from_parts(
        id: ItemId,
        expiration_date: Timestamp,
        title: String,
        description: String,
        completion_percentage: i64,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            expiration_date,
            title,
            description,
            completion_percentage: CompletionPercentage::new(completion_percentage)?,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn expiration_date(&self) -> Timestamp {
        self.expiration_date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completion_percentage(&self) -> CompletionPercentage {
        self.completion_percentage
    }

    /// Replaces the mutable fields as given. No trimming happens here.
    pub fn update(
        &mut self,
        expiration_date: Timestamp,
        title: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.expiration_date = expiration_date;
        self.title = title.into();
        self.description = description.into();
    }

    pub fn mark_as_done(&mut self) {
        self.completion_percentage = CompletionPercentage::MAX;
    }

    /// Sets the completion percentage, leaving the item untouched when
    /// `value` is outside `0..=100`.
    pub fn set_completion_percentage(&mut self, value: i64) -> Result<(), CoreError> {
        self.completion_percentage = CompletionPercentage::new(value)?;
        Ok(())
    }

    /// Trims leading and trailing whitespace from title and description.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_owned();
    }
}
