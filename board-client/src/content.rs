//! Конверт содержимого поста.
//!
//! Поле `content` поста хранит JSON вида
//! `{"type": "toast", "markdown": ..., "html": ..., "images": [...]}`.
//! Старые или сторонние посты могут содержать обычный текст, поэтому
//! разбор никогда не падает: при неудаче строится «деградированный»
//! конверт, где и markdown, и html равны исходной строке.

use serde::Deserialize;

/// Значение поля `type` у конвертов, созданных редактором.
pub const TOAST_KIND: &str = "toast";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Разобранный конверт содержимого.
pub struct ContentEnvelope {
    /// Тип конверта (`"toast"`).
    pub kind: String,
    /// Markdown-представление.
    pub markdown: String,
    /// HTML-представление.
    pub html: String,
    /// URL изображений, загруженных для этого поста.
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    markdown: Option<String>,
    html: Option<String>,
    images: Option<Vec<String>>,
}

impl RawEnvelope {
    fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<Self>(raw).ok()
    }

    fn is_toast(&self) -> bool {
        self.kind.as_deref() == Some(TOAST_KIND) && self.html.is_some()
    }
}

impl ContentEnvelope {
    /// Строит конверт редактора.
    pub fn new(markdown: impl Into<String>, html: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            kind: TOAST_KIND.to_string(),
            markdown: markdown.into(),
            html: html.into(),
            images,
        }
    }

    /// Конверт, который подставляется вместо неразборчивого содержимого.
    pub fn degraded(raw: &str) -> Self {
        Self::new(raw, raw, Vec::new())
    }

    /// Разбирает сохранённое содержимое поста.
    ///
    /// Невалидный JSON или JSON другой формы превращается в
    /// [`ContentEnvelope::degraded`].
    pub fn decode(raw: &str) -> Self {
        match RawEnvelope::parse(raw) {
            Some(parsed) if parsed.is_toast() => Self {
                kind: TOAST_KIND.to_string(),
                markdown: parsed.markdown.unwrap_or_default(),
                html: parsed.html.unwrap_or_default(),
                images: parsed.images.unwrap_or_default(),
            },
            _ => Self::degraded(raw),
        }
    }

    /// Сериализует конверт в строку для поля `content`.
    pub fn encode(&self) -> String {
        serde_json::json!({
            "type": self.kind,
            "markdown": self.markdown,
            "html": self.html,
            "images": self.images,
        })
        .to_string()
    }
}

/// Сериализует канонический конверт редактора.
pub fn encode(markdown: &str, html: &str, images: &[String]) -> String {
    ContentEnvelope::new(markdown, html, images.to_vec()).encode()
}

/// Разбирает содержимое поста, см. [`ContentEnvelope::decode`].
pub fn decode(raw: &str) -> ContentEnvelope {
    ContentEnvelope::decode(raw)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Как обращаться с HTML из конверта перед выводом.
///
/// HTML приходит из редактора и сохраняется сервером без очистки.
/// Выбор между доверием и санитизацией делается явно в конфигурации.
pub enum HtmlPolicy {
    /// Выводить HTML как есть.
    #[default]
    Trusted,
    /// Пропускать HTML через `ammonia` перед выводом.
    Sanitized,
}

impl HtmlPolicy {
    /// Применяет политику к фрагменту HTML.
    pub fn apply(self, html: &str) -> String {
        match self {
            Self::Trusted => html.to_string(),
            Self::Sanitized => ammonia::clean(html),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Содержимое поста, готовое к выводу.
pub enum RenderedContent {
    /// Разметка, которую нужно вставить как HTML.
    Html(String),
    /// Текст, который нужно вывести как есть, с экранированием.
    Text(String),
}

impl RenderedContent {
    /// Выбирает представление для просмотра поста.
    ///
    /// HTML используется только для конверта редактора с непустым `html`,
    /// всё остальное показывается исходной строкой как текст.
    pub fn from_raw(raw: &str, policy: HtmlPolicy) -> Self {
        match RawEnvelope::parse(raw) {
            Some(parsed) if parsed.is_toast() => {
                let html = parsed.html.unwrap_or_default();
                if html.is_empty() {
                    Self::Text(raw.to_string())
                } else {
                    Self::Html(policy.apply(&html))
                }
            }
            _ => Self::Text(raw.to_string()),
        }
    }
}
