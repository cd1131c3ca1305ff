//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seed;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped trace identifier attached by the [`middleware::Trace`] layer.
pub use domain::TraceId;
/// Middleware attaching a trace identifier to every request.
pub use middleware::Trace;
