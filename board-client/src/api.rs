use async_trait::async_trait;

use crate::error::BoardClientResult;
use crate::models::{ImageBlob, ImageGcResult, ImageUpload, PageResult, Post, PostPayload};

/// Операции backend-сервиса доски объявлений.
///
/// Реализуется HTTP-клиентом (`reqwest`) и браузерным клиентом во
/// фронтенде. Контроллеры зависят только от этого трейта.
#[async_trait(?Send)]
pub trait BoardApi {
    /// Страница списка постов. Непустой (после `trim`) `keyword` переключает
    /// запрос на поиск.
    async fn fetch_posts(&self, page: u32, size: u32, keyword: &str)
    -> BoardClientResult<PageResult>;

    /// Пост по идентификатору.
    async fn get_post(&self, id: i64) -> BoardClientResult<Post>;

    /// Создаёт пост.
    async fn create_post(&self, payload: &PostPayload) -> BoardClientResult<Post>;

    /// Обновляет пост.
    async fn update_post(&self, id: i64, payload: &PostPayload) -> BoardClientResult<Post>;

    /// Удаляет пост.
    async fn delete_post(&self, id: i64) -> BoardClientResult<()>;

    /// Загружает изображение и возвращает его URL.
    async fn upload_image(&self, image: &ImageBlob) -> BoardClientResult<ImageUpload>;

    /// Удаляет изображения, на которые не ссылается ни один пост.
    async fn cleanup_orphan_images(&self) -> BoardClientResult<ImageGcResult>;
}

/// Выбирает между поиском и обычным списком.
pub fn is_search(keyword: &str) -> bool {
    !keyword.trim().is_empty()
}
