//! Store access: every SQL statement in the crate lives here.

mod posts;
mod users;

pub use posts::PostService;
pub use users::UserService;
