//! HTTP surface of the service.
//!
//! Handlers are grouped the way deployments split them: `users` carries the
//! login and directory routes, `quotes` the public reads, and
//! `modification` the writes. `server::route_group` decides which groups a
//! process mounts.

pub mod bearer;
pub mod error;
pub mod health;
pub mod modification;
pub mod quotes;
pub mod state;
pub mod users;

pub use error::ApiResult;
