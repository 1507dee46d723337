//! One module per resource family.
//!
//! Each module exposes the pure request constructors for its endpoints
//! (useful for inspecting exactly what would be sent) and adds the
//! matching async methods to [`Client`](crate::Client).

pub mod artists;
pub mod comments;
pub mod dmails;
pub mod favorites;
pub mod notes;
pub mod posts;
pub mod uploads;
