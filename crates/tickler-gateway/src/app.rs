use crate::handlers::{
    create_item_handler, delete_item_handler, get_item_handler, health_handler,
    incoming_items_handler, list_items_handler, mark_as_done_handler,
    set_completion_percentage_handler, update_item_handler,
};
use crate::state::AppState;
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

pub struct App;

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/items", get(list_items_handler).post(create_item_handler))
            .route("/items/incoming", get(incoming_items_handler))
            .route(
                "/items/{id}",
                get(get_item_handler)
                    .put(update_item_handler)
                    .delete(delete_item_handler),
            )
            .route(
                "/items/{id}/completionPercentage",
                put(set_completion_percentage_handler),
            )
            .route("/items/{id}/markAsDone", put(mark_as_done_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
