use std::sync::Arc;

use tickler_core::ItemManager;

#[derive(Clone)]
pub struct AppState {
    items: Arc<dyn ItemManager>,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemManager>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &dyn ItemManager {
        self.items.as_ref()
    }
}
