use thiserror::Error;

use crate::{domain::error::DomainError, infra::error::InfraError};

use super::api::ApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Message shown to the user when an action fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(err) => err.to_string(),
            Self::Api(err) => format!("Request failed: {err}"),
            Self::Infra(_) | Self::Unexpected(_) => "Something went wrong.".to_string(),
        }
    }
}
