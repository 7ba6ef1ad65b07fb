//! Просмотр поста.

use tracing::{error, warn};

use crate::api::BoardApi;
use crate::content::{HtmlPolicy, RenderedContent};
use crate::date_format::format_date_time;
use crate::error::{BoardClientError, BoardClientResult};
use crate::models::Post;
use crate::routes::Route;
use crate::ui::Interaction;

/// Сообщение при неудачной загрузке поста.
pub const LOAD_ERROR_MESSAGE: &str = "Не удалось загрузить пост.";
/// Сообщение, когда пост не существует.
pub const NOT_FOUND_MESSAGE: &str = "Пост не найден.";
/// Вопрос перед удалением.
pub const DELETE_CONFIRM_MESSAGE: &str = "Удалить этот пост?";
/// Сообщение при неудачном удалении.
pub const DELETE_ERROR_MESSAGE: &str = "Не удалось удалить пост.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Строка метаданных под заголовком.
pub struct DetailMeta {
    /// Автор.
    pub writer: String,
    /// Дата создания для вывода.
    pub created_at: String,
    /// Дата изменения для вывода, если пост менялся.
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone)]
/// Состояние экрана просмотра поста.
pub struct DetailState {
    post_id: i64,
    html_policy: HtmlPolicy,
    post: Option<Post>,
    loading: bool,
    deleting: bool,
    error: Option<String>,
}

impl DetailState {
    /// Состояние для поста `post_id` до загрузки.
    pub fn new(post_id: i64, html_policy: HtmlPolicy) -> Self {
        Self {
            post_id,
            html_policy,
            post: None,
            loading: false,
            deleting: false,
            error: None,
        }
    }

    /// Идентификатор открытого поста.
    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    /// Загруженный пост.
    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    /// Идёт ли загрузка.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Идёт ли удаление.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Сообщение об ошибке загрузки.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Доступны ли кнопки редактирования и удаления.
    pub fn controls_enabled(&self) -> bool {
        self.post.is_some() && !self.deleting
    }

    /// Начинает загрузку поста.
    pub fn begin_load(&mut self) -> i64 {
        self.loading = true;
        self.error = None;
        self.post_id
    }

    /// Применяет ответ сервера.
    pub fn finish_load(&mut self, outcome: BoardClientResult<Post>) {
        match outcome {
            Ok(post) => self.post = Some(post),
            Err(BoardClientError::NotFound) => {
                warn!(post_id = self.post_id, "post not found");
                self.error = Some(NOT_FOUND_MESSAGE.to_string());
            }
            Err(err) => {
                error!(post_id = self.post_id, error = %err, "failed to load post");
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }

    /// Содержимое для вывода.
    pub fn rendered_content(&self) -> Option<RenderedContent> {
        self.post
            .as_ref()
            .map(|post| RenderedContent::from_raw(&post.content, self.html_policy))
    }

    /// Метаданные поста.
    pub fn meta(&self) -> Option<DetailMeta> {
        self.post.as_ref().map(|post| DetailMeta {
            writer: post.writer.clone(),
            created_at: format_date_time(post.created_at.as_ref()),
            updated_at: post
                .updated_at
                .as_ref()
                .map(|updated| format_date_time(Some(updated))),
        })
    }

    /// Экран редактирования этого поста.
    pub fn edit_route(&self) -> Route {
        Route::EditPost(self.post_id)
    }

    /// Спрашивает подтверждение и помечает начало удаления.
    ///
    /// Возвращает `None`, если удаление уже идёт или пользователь отказался;
    /// состояние при этом не меняется.
    pub fn begin_delete(&mut self, interaction: &dyn Interaction) -> Option<i64> {
        if !self.controls_enabled() {
            return None;
        }
        if !interaction.confirm(DELETE_CONFIRM_MESSAGE) {
            return None;
        }
        self.deleting = true;
        Some(self.post_id)
    }

    /// Применяет результат удаления; при успехе возвращает экран списка.
    pub fn finish_delete(
        &mut self,
        outcome: BoardClientResult<()>,
        interaction: &dyn Interaction,
    ) -> Option<Route> {
        self.deleting = false;
        match outcome {
            Ok(()) => Some(Route::Listing),
            Err(err) => {
                error!(post_id = self.post_id, error = %err, "failed to delete post");
                interaction.alert(DELETE_ERROR_MESSAGE);
                None
            }
        }
    }
}

/// Экран просмотра поста поверх [`BoardApi`].
pub struct DetailController<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    interaction: &'a dyn Interaction,
    state: DetailState,
}

impl<'a, A: BoardApi + ?Sized> DetailController<'a, A> {
    /// Создаёт контроллер для поста `post_id`.
    pub fn new(
        api: &'a A,
        interaction: &'a dyn Interaction,
        post_id: i64,
        html_policy: HtmlPolicy,
    ) -> Self {
        Self {
            api,
            interaction,
            state: DetailState::new(post_id, html_policy),
        }
    }

    /// Текущее состояние.
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Загружает пост.
    pub async fn load(&mut self) {
        let id = self.state.begin_load();
        let outcome = self.api.get_post(id).await;
        self.state.finish_load(outcome);
    }

    /// Удаляет пост после подтверждения; возвращает экран для перехода.
    pub async fn delete(&mut self) -> Option<Route> {
        let id = self.state.begin_delete(self.interaction)?;
        let outcome = self.api.delete_post(id).await;
        self.state.finish_delete(outcome, self.interaction)
    }

    /// Экран редактирования.
    pub fn edit(&self) -> Route {
        self.state.edit_route()
    }
}
