//! API middleware.

mod session;

pub use session::{bearer_token, session_middleware, OptionalSession};
