//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{Post, PostUpdate};
pub use user::User;
