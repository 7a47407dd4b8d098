//! Typed ID definitions for domain entities.

pub use super::id::Id;

/// Marker type for persisted posts.
pub struct Post;

/// Typed ID for Post records.
pub type PostId = Id<Post>;
