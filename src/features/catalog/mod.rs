//! Classification catalog feature.
//!
//! Read-only reference data: categories (emergency / non-emergency) and
//! their subcategories, seeded by migration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | List categories, optional type filter |
//! | GET | `/api/categories/{id}/subcategories` | No | List subcategories |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CatalogService;
