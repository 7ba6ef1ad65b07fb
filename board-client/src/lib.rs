//! Клиент доски объявлений: HTTP-доступ к backend и состояние экранов.
//!
//! Вся бизнес-логика (хранение, поиск, расчёт пагинации, учёт изображений)
//! живёт на сервере. Библиотека предоставляет:
//! - [`HttpClient`]: реализацию [`BoardApi`] поверх `reqwest`;
//! - кодек конверта содержимого ([`ContentEnvelope`]);
//! - контроллеры экранов списка, просмотра, формы и очистки изображений;
//! - таблицу маршрутов ([`Route`]).
#![warn(missing_docs)]

mod api;
mod config;
pub mod content;
pub mod controllers;
mod date_format;
mod editor;
mod error;
mod http_client;
mod models;
mod routes;
mod ui;

pub use api::{BoardApi, is_search};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use content::{ContentEnvelope, HtmlPolicy, RenderedContent};
pub use date_format::format_date_time;
pub use editor::MarkdownEditor;
pub use error::{BoardClientError, BoardClientResult};
pub use http_client::HttpClient;
pub use models::{
    BlockPagination, ImageBlob, ImageGcResult, ImageUpload, PageResult, Post, PostPayload,
    PostSummary, Timestamp,
};
pub use routes::Route;
pub use ui::{Interaction, RichTextEditor};
