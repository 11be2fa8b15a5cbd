pub mod group;
pub mod user;

pub use group::CourseGroup;
pub use user::{Credentials, Role, User};
