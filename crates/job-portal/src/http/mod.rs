//! HTTP glue shared by the board routers: state, extractors and error rendering.

mod blocking;
mod error;
mod extract;
mod router;
mod state;

pub(crate) use blocking::run_blocking;
pub use error::ApiError;
pub use extract::CurrentUser;
pub use router::portal_router;
pub use state::PortalState;
