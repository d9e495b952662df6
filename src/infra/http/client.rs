use async_trait::async_trait;
use metrics::counter;
use postboard_api_types::{NewPost, Post, PostId, PostPatch};
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::application::api::{ApiError, PostsApi};
use crate::infra::telemetry::{METRIC_API_FAILURES, METRIC_API_REQUESTS};

const POSTS_PATH: &str = "posts";

/// `PostsApi` backed by a JSON REST resource at `{base}/posts`.
#[derive(Clone, Debug)]
pub struct HttpPostsApi {
    client: Client,
    base: Url,
}

impl HttpPostsApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(ApiError::transport)?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("postboard/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        self.base.join(POSTS_PATH).map_err(ApiError::Url)
    }

    fn item_url(&self, id: &PostId) -> Result<Url, ApiError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| ApiError::transport("base URL cannot carry a path"))?
            .push(&id.to_string());
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        debug!(method = %method, path = url.path(), "posts request");
        counter!(METRIC_API_REQUESTS, "method" => method.to_string()).increment(1);

        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|err| {
            Self::record_failure(&method);
            ApiError::transport(err)
        })?;

        let status = resp.status();
        if !status.is_success() {
            Self::record_failure(&method);
            let text = resp.text().await.unwrap_or_default();
            warn!(method = %method, status = status.as_u16(), "posts request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(resp)
    }

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let resp = self.send(method.clone(), url, body).await?;
        let bytes = resp.bytes().await.map_err(|err| {
            Self::record_failure(&method);
            ApiError::transport(err)
        })?;
        serde_json::from_slice(&bytes).map_err(|err| {
            Self::record_failure(&method);
            ApiError::decode(err)
        })
    }

    fn record_failure(method: &Method) {
        counter!(METRIC_API_FAILURES, "method" => method.to_string()).increment(1);
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let url = self.collection_url()?;
        self.request(Method::GET, url, None::<&()>).await
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, ApiError> {
        let url = self.item_url(id)?;
        self.request(Method::GET, url, None::<&()>).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        let url = self.collection_url()?;
        self.request(Method::POST, url, Some(post)).await
    }

    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post, ApiError> {
        let url = self.item_url(id)?;
        self.request(Method::PATCH, url, Some(patch)).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }
}
