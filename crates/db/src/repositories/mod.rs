//! Repository structs, one per table or query family.
//!
//! Repositories are zero-sized types with associated `async fn`s taking the
//! pool (or, for writes that may join a transaction, any Postgres executor).

mod filter;

pub mod comment_repo;
pub mod manager_repo;
pub mod todo_repo;
pub mod todo_search_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use manager_repo::ManagerRepo;
pub use todo_repo::TodoRepo;
pub use todo_search_repo::TodoSearchRepo;
pub use user_repo::UserRepo;
