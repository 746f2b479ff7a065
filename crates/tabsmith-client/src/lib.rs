//! Generation service access and the submission session.
//!
//! [`GenerationService`] is the seam to the remote service; the HTTP
//! implementation lives in [`http`]. [`Session`] owns the schema model and
//! the result store and runs one request at a time.

pub mod errors;
pub mod http;
pub mod options;
pub mod service;
pub mod session;
pub mod store;

pub use errors::{ServiceError, SessionError};
pub use http::{HttpGenerationService, error_message};
pub use options::ServiceOptions;
pub use service::{GenerationService, HealthStatus};
pub use session::{PendingRequest, RequestState, Session};
pub use store::ResultStore;
