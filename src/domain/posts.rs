use postboard_api_types::{NewPost, Post, PostPatch};

use super::error::DomainError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Raw values of the new-post form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPostForm {
    pub title: String,
    pub content: String,
    pub author: String,
    pub image: String,
}

/// Raw values of the edit form (`edit-title` / `edit-content`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPostForm {
    pub title: String,
    pub content: String,
}

/// Trim the new-post form and enforce the required fields.
///
/// Title, content and author must be non-empty after trimming; the image
/// URL may be empty.
pub fn validate_new_post(form: &NewPostForm) -> Result<NewPost, DomainError> {
    let title = form.title.trim();
    let content = form.content.trim();
    let author = form.author.trim();

    if title.is_empty() || content.is_empty() || author.is_empty() {
        return Err(DomainError::validation(REQUIRED_FIELDS_MESSAGE));
    }

    Ok(NewPost {
        title: title.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        image: form.image.trim().to_string(),
    })
}

/// Trim the edit form into a patch body. Empty values are sent as typed.
pub fn edit_patch(form: &EditPostForm) -> PostPatch {
    PostPatch {
        title: form.title.trim().to_string(),
        content: form.content.trim().to_string(),
    }
}

/// Posts whose author contains `query`, ignoring case, in their original order.
pub fn filter_by_author<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    if query.is_empty() {
        return posts.iter().collect();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.author.to_lowercase().contains(&needle))
        .collect()
}
