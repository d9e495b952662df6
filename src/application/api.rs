use async_trait::async_trait;
use postboard_api_types::{NewPost, Post, PostId, PostPatch};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// The `/posts` resource as seen by the client.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    async fn get_post(&self, id: &PostId) -> Result<Post, ApiError>;

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError>;

    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post, ApiError>;

    /// The response body, if any, is ignored.
    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError>;
}
