//! Domain models

pub mod admin;
pub mod category;
pub mod comment;
pub mod post;
pub mod session;

pub use admin::Admin;
pub use category::{Category, DEFAULT_CATEGORY_NAME};
pub use comment::Comment;
pub use post::Post;
pub use session::Session;
