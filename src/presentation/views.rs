use askama::{Error as AskamaError, Template};
use postboard_api_types::{Post, PostId};
use thiserror::Error;
use tracing::error;

use crate::domain::posts::{EditPostForm, NewPostForm};
use crate::infra::error::InfraError;

pub const DELETED_PLACEHOLDER: &str = "Post deleted.";
const EMPTY_DETAIL: &str = r#"<div id="post-detail"></div>"#;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for InfraError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        error!(source, error = %error, "{public_message}");
        InfraError::render(format!("{public_message} in {source}: {error}"))
    }
}

pub fn render_template<T: Template>(template: &T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

/// One clickable entry of the list view. The id is captured when the row is
/// rendered, so later list replacements cannot retarget a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: PostId,
    pub label: String,
}

impl ListRow {
    pub fn for_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            label: post.title.clone(),
        }
    }
}

/// Content of the detail container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailPane {
    #[default]
    Empty,
    Post(Post),
    Deleted,
}

impl DetailPane {
    pub fn post(&self) -> Option<&Post> {
        match self {
            Self::Post(post) => Some(post),
            Self::Empty | Self::Deleted => None,
        }
    }
}

#[derive(Template)]
#[template(path = "post_list.html")]
pub struct PostListTemplate<'a> {
    pub rows: &'a [ListRow],
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailTemplate<'a> {
    pub post: &'a Post,
}

#[derive(Template)]
#[template(path = "post_deleted.html")]
pub struct PostDeletedTemplate {
    pub message: &'static str,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub search: &'a str,
    pub list_html: String,
    pub detail_html: String,
    pub edit_visible: bool,
    pub edit: &'a EditPostForm,
    pub new_post: &'a NewPostForm,
}

pub fn render_list(rows: &[ListRow]) -> Result<String, TemplateRenderError> {
    render_template(&PostListTemplate { rows })
}

pub fn render_detail(pane: &DetailPane) -> Result<String, TemplateRenderError> {
    match pane {
        DetailPane::Empty => Ok(EMPTY_DETAIL.to_string()),
        DetailPane::Post(post) => render_template(&PostDetailTemplate { post }),
        DetailPane::Deleted => render_template(&PostDeletedTemplate {
            message: DELETED_PLACEHOLDER,
        }),
    }
}
