//! API Module
//!
//! HTTP handlers and routing for the demo brands API.
//!
//! # Endpoints
//! - `POST /brands` - Create a brand (invalidates cached lists)
//! - `GET /brands` - Paged brand list (cached, grouped)
//! - `GET /brands/:id` - Single brand (cached)
//! - `DELETE /brands/:id` - Delete a brand (invalidates its entry and lists)
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
