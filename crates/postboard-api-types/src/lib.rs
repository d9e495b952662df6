//! Request and response shapes for the `/posts` resource.
//!
//! The backend assigns ids; depending on the server they arrive as JSON
//! numbers or strings, so [`PostId`] accepts both and renders either as a
//! path segment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl PostId {
    /// Parse a user-typed id, preferring the numeric form.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::from(trimmed), Self::from)
    }
}

/// A post as returned by `GET /posts`, `GET /posts/{id}`, `POST` and `PATCH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Post {
    /// Image URL when one is set and non-blank.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Body of `POST /posts`; the id is assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub image: String,
}

/// Body of `PATCH /posts/{id}`. Author and image are not editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
}
