use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `board-client`.
pub enum BoardClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер недоступен: соединение не установлено или истёк таймаут.
    #[error("network error: {0}")]
    Network(String),

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос или бизнес-ошибка валидации.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Сервер ответил неуспешным статусом, не попавшим в другие категории.
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение из тела ответа или статус в текстовом виде.
        message: String,
    },

    /// Тело ответа не удалось разобрать.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `board-client`.
pub type BoardClientResult<T> = Result<T, BoardClientError>;

impl BoardClientError {
    /// Классифицирует неуспешный HTTP-статус.
    pub fn from_http_status(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            404 => Self::NotFound,
            400 | 409 | 422 => Self::InvalidRequest(message),
            _ => Self::Server { status, message },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status.as_u16(), None);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if err.is_timeout() {
            return Self::Network(err.to_string());
        }
        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return Self::Network(err.to_string());
        }
        Self::Http(err)
    }
}
