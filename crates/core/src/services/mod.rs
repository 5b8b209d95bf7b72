//! Business services.

pub mod photo;
pub mod session;
pub mod user;

pub use photo::{
    CommentCounts, PhotoService, PhotoWithComments, ResolvedComment, UserCommentRef,
};
pub use session::{MemorySessionStore, SessionService, SessionStore};
pub use user::{RegisterUserInput, UserService};
