//! WebSocket delivery of report events to subscribed views.
//!
//! Browsers cannot attach headers to a WebSocket upgrade, so the bearer
//! token arrives as a query parameter and is validated before the upgrade
//! is accepted. The subscription scope is derived from the caller's role:
//! admins receive every mutation, citizens only their own reports.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::core::error::Result;
use crate::features::auth::TokenValidator;
use crate::features::events::bus::EventBus;
use crate::features::events::model::{ReportEvent, SubscriptionScope};

/// Shared state for the subscription endpoint
#[derive(Clone)]
pub struct EventsState {
    pub bus: Arc<EventBus>,
    pub token_validator: Arc<TokenValidator>,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeParams {
    pub token: String,
}

/// Frames sent to subscribers.
///
/// `resync` tells the view it missed events (buffer overrun) and must
/// re-run its query; delivery is at-most-once, never replayed.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsFrame<'a> {
    Event { event: &'a ReportEvent },
    Resync,
}

/// HTTP handler that validates the token and upgrades to WebSocket
pub async fn subscribe_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<SubscribeParams>,
    State(state): State<EventsState>,
) -> Result<Response> {
    let user = state.token_validator.validate_token(&params.token)?;

    let scope = if user.is_admin() {
        SubscriptionScope::AllReports
    } else {
        SubscriptionScope::Reporter(user.id)
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, scope, state.bus)))
}

/// Forward scoped events to one connection until either side closes.
///
/// Per-report ordering is inherited from the bus: the controller publishes
/// after each commit, and the broadcast channel preserves publish order.
async fn handle_socket(socket: WebSocket, scope: SubscriptionScope, bus: Arc<EventBus>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, ?scope, "Event subscriber connected");

    let mut rx = bus.subscribe();
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    if !scope.matches(&event) {
                        continue;
                    }
                    if send_frame(&mut sink, &WsFrame::Event { event: &event }).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(conn_id = %conn_id, skipped, "Event subscriber lagged");
                    if send_frame(&mut sink, &WsFrame::Resync).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {
                    // Subscribers only listen; inbound frames are ignored.
                }
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
        }
    }

    tracing::info!(conn_id = %conn_id, "Event subscriber disconnected");
}

async fn send_frame(
    sink: &mut futures::stream::SplitSink<WebSocket, Message>,
    frame: &WsFrame<'_>,
) -> std::result::Result<(), axum::Error> {
    let payload = serde_json::to_string(frame).map_err(axum::Error::new)?;
    sink.send(Message::Text(payload.into())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::events::model::ReportEventKind;
    use crate::features::reports::models::{Report, ReportStatus, ReportType};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn event_frame_shape() {
        let report = Report {
            id: Uuid::nil(),
            title: "t".to_string(),
            description: "d".to_string(),
            report_type: ReportType::Emergency,
            status: ReportStatus::Pending,
            category_id: Uuid::nil(),
            subcategory_id: None,
            location_address: None,
            location_lat: None,
            location_lng: None,
            image_refs: vec![],
            assigned_officer_id: None,
            resolution_details: None,
            reporter_id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let event = ReportEvent::new(ReportEventKind::Created, report);

        let json: serde_json::Value =
            serde_json::to_value(WsFrame::Event { event: &event }).unwrap();
        assert_eq!(json["type"], "event");
        assert_eq!(json["event"]["kind"], "created");
        assert_eq!(json["event"]["report"]["status"], "pending");
    }

    #[test]
    fn resync_frame_shape() {
        let json: serde_json::Value = serde_json::to_value(WsFrame::Resync).unwrap();
        assert_eq!(json["type"], "resync");
    }
}
