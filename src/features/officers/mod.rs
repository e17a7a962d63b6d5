//! Officer directory feature.
//!
//! Read-only directory used by the admin view to populate the assignment
//! control. Seeded by migration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/officers` | Admin | List officers |
//! | GET | `/api/officers/{id}` | Admin | Get officer |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::OfficerService;
