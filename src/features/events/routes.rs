use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::auth::TokenValidator;
use crate::features::events::bus::EventBus;
use crate::features::events::ws::{self, EventsState};

/// Create the change propagation route
///
/// Sits outside the HTTP auth middleware; the handler validates the token
/// itself (query parameter) before accepting the upgrade.
pub fn routes(bus: Arc<EventBus>, token_validator: Arc<TokenValidator>) -> Router {
    let state = EventsState {
        bus,
        token_validator,
    };

    Router::new()
        .route("/api/events/ws", get(ws::subscribe_handler))
        .with_state(state)
}
