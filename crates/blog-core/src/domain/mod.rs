//! Domain entities - the core business objects.

mod post;

pub use post::{
    CONTENT_MIN_CHARS, Post, PostDraft, PostId, TITLE_MIN_CHARS, parse_post_id,
    validate_post_fields,
};
