use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::api::{BoardApi, is_search};
use crate::config::ClientConfig;
use crate::error::{BoardClientError, BoardClientResult};
use crate::models::{ImageBlob, ImageGcResult, ImageUpload, PageResult, Post, PostPayload};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorResponseDto {
    fn into_message(self) -> Option<String> {
        [self.message, self.error]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

#[derive(Serialize)]
struct ListPostsQuery {
    page: u32,
    size: u32,
}

#[derive(Serialize)]
struct SearchPostsQuery<'a> {
    keyword: &'a str,
    page: u32,
    size: u32,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API доски объявлений.
///
/// Создаётся один раз и передаётся по ссылке всем контроллерам.
pub struct HttpClient {
    config: ClientConfig,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с базовым URL и заголовками по умолчанию.
    pub fn new(config: ClientConfig) -> BoardClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout);

        let client = builder.build()?;
        Ok(Self { config, client })
    }

    /// Настройки, с которыми создан клиент.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(%method, %url, "board api request");
        self.client.request(method, url)
    }

    async fn decode_error(response: reqwest::Response) -> BoardClientError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorResponseDto>()
            .await
            .ok()
            .and_then(ErrorResponseDto::into_message);
        BoardClientError::from_http_status(status, message)
    }

    /// Отправляет запрос и проверяет статус ответа.
    async fn send(request: RequestBuilder) -> BoardClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(BoardClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> BoardClientResult<T> {
        Self::send(request)
            .await?
            .json::<T>()
            .await
            .map_err(BoardClientError::from_reqwest)
    }
}

#[async_trait(?Send)]
impl BoardApi for HttpClient {
    async fn fetch_posts(
        &self,
        page: u32,
        size: u32,
        keyword: &str,
    ) -> BoardClientResult<PageResult> {
        let request = if is_search(keyword) {
            self.request(Method::GET, "/posts/search")
                .query(&SearchPostsQuery {
                    keyword,
                    page,
                    size,
                })
        } else {
            self.request(Method::GET, "/posts")
                .query(&ListPostsQuery { page, size })
        };
        Self::send_json(request).await
    }

    async fn get_post(&self, id: i64) -> BoardClientResult<Post> {
        Self::send_json(self.request(Method::GET, &format!("/posts/{id}"))).await
    }

    async fn create_post(&self, payload: &PostPayload) -> BoardClientResult<Post> {
        Self::send_json(self.request(Method::POST, "/posts").json(payload)).await
    }

    async fn update_post(&self, id: i64, payload: &PostPayload) -> BoardClientResult<Post> {
        Self::send_json(self.request(Method::PUT, &format!("/posts/{id}")).json(payload)).await
    }

    async fn delete_post(&self, id: i64) -> BoardClientResult<()> {
        Self::send(self.request(Method::DELETE, &format!("/posts/{id}"))).await?;
        Ok(())
    }

    async fn upload_image(&self, image: &ImageBlob) -> BoardClientResult<ImageUpload> {
        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = multipart::Form::new().part("file", part);

        Self::send_json(self.request(Method::POST, "/posts/images").multipart(form)).await
    }

    async fn cleanup_orphan_images(&self) -> BoardClientResult<ImageGcResult> {
        Self::send_json(self.request(Method::DELETE, "/admin/images/cleanup")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new(ClientConfig::with_base_url("http://localhost:9090/"))
            .expect("client must build");
        assert_eq!(client.endpoint("/posts"), "http://localhost:9090/posts");
    }

    #[test]
    fn error_body_prefers_message_over_error() {
        let dto = ErrorResponseDto {
            message: Some("post 3 not found".to_string()),
            error: Some("Not Found".to_string()),
        };
        assert_eq!(dto.into_message().as_deref(), Some("post 3 not found"));
    }

    #[test]
    fn error_body_skips_blank_message() {
        let dto = ErrorResponseDto {
            message: Some("  ".to_string()),
            error: Some("Bad Request".to_string()),
        };
        assert_eq!(dto.into_message().as_deref(), Some("Bad Request"));
    }
}
