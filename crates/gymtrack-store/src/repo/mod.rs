//! Repository layer mapping `members` and `workout_sessions` rows to
//! domain models
//!
//! Every function takes a [`UnitOfWork`](crate::UnitOfWork); nothing here
//! commits or rolls back.

pub mod member_repo;
pub mod session_repo;

pub use member_repo::MemberRepo;
pub use session_repo::SessionRepo;
