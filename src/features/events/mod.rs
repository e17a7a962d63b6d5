//! Change propagation feature.
//!
//! Every report mutation is published on an in-process broadcast bus and
//! fanned out to scoped WebSocket subscribers, so open views converge
//! without polling. Delivery is at-most-once: subscribers that lag or
//! reconnect must perform one full re-query.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/events/ws?token=` | Token param | Subscribe to report events |

pub mod bus;
pub mod model;
pub mod routes;
pub mod ws;

pub use bus::EventBus;
pub use model::{ReportEvent, ReportEventKind, SubscriptionScope};
