pub mod auth;
pub mod diagnostics;
pub mod notifications;
pub mod progress;
pub mod router;
pub mod state;
pub mod steps;

// Re-export the router constructor to make it easily accessible to the
// binary and the integration tests.
pub use router::{build_router, ApiDoc};
pub use state::AppState;
