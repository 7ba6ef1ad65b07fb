use std::time::Duration;

use crate::content::HtmlPolicy;

/// Адрес backend по умолчанию.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090";
/// Размер страницы списка по умолчанию.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Настройки клиента, задаются один раз при старте.
pub struct ClientConfig {
    /// Базовый URL backend, например `http://localhost:9090`.
    pub base_url: String,
    /// Таймаут установки соединения (не применяется в браузере).
    pub connect_timeout: Duration,
    /// Таймаут запроса целиком (не применяется в браузере).
    pub request_timeout: Duration,
    /// Размер страницы списка.
    pub page_size: u32,
    /// Обращение с HTML при просмотре поста.
    pub html_policy: HtmlPolicy,
}

impl ClientConfig {
    /// Настройки по умолчанию с другим базовым URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            page_size: DEFAULT_PAGE_SIZE,
            html_policy: HtmlPolicy::Trusted,
        }
    }
}
