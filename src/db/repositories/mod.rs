//! Repositories
//!
//! Data access for each entity, behind a trait so services and handlers can
//! be tested against fakes if needed. Each `SqlxXxxRepository` works on the
//! shared SQLite pool.

pub mod admin;
pub mod category;
pub mod comment;
pub mod post;
pub mod session;

pub use admin::{AdminRepository, SqlxAdminRepository};
pub use category::{CategoryRepository, SqlxCategoryRepository};
pub use comment::{CommentFilter, CommentRepository, SqlxCommentRepository};
pub use post::{PostRepository, SqlxPostRepository};
pub use session::{SessionRepository, SqlxSessionRepository};
