//! Report lifecycle feature.
//!
//! The lifecycle controller is the single mutation path for reports; the
//! query service is the single read path. Both feed the change propagation
//! channel so every open view converges on the store.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/reports` | Yes | Submit a report |
//! | GET | `/api/reports` | Yes | Scoped, filtered list |
//! | GET | `/api/reports/stats` | Yes | Per-bucket counts |
//! | GET | `/api/reports/{id}` | Yes | Single report |
//! | PATCH | `/api/reports/{id}/status` | Admin | Advance status |
//! | PUT | `/api/reports/{id}/officer` | Admin | Assign / unassign officer |
//! | PUT | `/api/reports/{id}/resolution` | Admin | Attach resolution details |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{LifecycleService, QueryService};
