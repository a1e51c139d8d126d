//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;
mod requester;
mod user;

pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};
pub use requester::Requester;
pub use user::{NewUser, User};
