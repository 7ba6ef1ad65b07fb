//! Форма создания и редактирования поста.

use tracing::{error, info};

use crate::api::BoardApi;
use crate::content::{ContentEnvelope, TOAST_KIND};
use crate::error::BoardClientResult;
use crate::models::{ImageBlob, ImageUpload, Post, PostPayload};
use crate::routes::Route;
use crate::ui::{Interaction, RichTextEditor};

/// Сообщение после успешного создания.
pub const CREATE_SUCCESS_MESSAGE: &str = "Пост опубликован.";
/// Сообщение при неудачном создании.
pub const CREATE_ERROR_MESSAGE: &str = "Не удалось создать пост.";
/// Сообщение после успешного обновления.
pub const UPDATE_SUCCESS_MESSAGE: &str = "Пост обновлён.";
/// Сообщение при неудачном обновлении.
pub const UPDATE_ERROR_MESSAGE: &str = "Не удалось обновить пост.";
/// Сообщение, если пост для редактирования не загрузился.
pub const LOAD_ERROR_MESSAGE: &str = "Не удалось загрузить пост.";
/// Сообщение при неудачной загрузке изображения.
pub const UPLOAD_ERROR_MESSAGE: &str = "Не удалось загрузить изображение.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Что делает форма.
pub enum EditorMode {
    /// Новый пост.
    Create,
    /// Изменение существующего поста.
    Update(i64),
}

#[derive(Debug, Clone)]
/// Состояние формы.
///
/// Заголовок и автор не проверяются: пустые значения отправляются как есть.
pub struct EditorState {
    mode: EditorMode,
    title: String,
    writer: String,
    image_urls: Vec<String>,
    loading: bool,
    submitting: bool,
}

impl EditorState {
    /// Пустая форма нового поста.
    pub fn for_create() -> Self {
        Self::new(EditorMode::Create)
    }

    /// Форма редактирования; до [`EditorState::finish_load`] считается загружающейся.
    pub fn for_update(post_id: i64) -> Self {
        let mut state = Self::new(EditorMode::Update(post_id));
        state.loading = true;
        state
    }

    fn new(mode: EditorMode) -> Self {
        Self {
            mode,
            title: String::new(),
            writer: String::new(),
            image_urls: Vec::new(),
            loading: false,
            submitting: false,
        }
    }

    /// Режим формы.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Заголовок.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Меняет заголовок.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Автор.
    pub fn writer(&self) -> &str {
        &self.writer
    }

    /// Меняет автора.
    pub fn set_writer(&mut self, writer: impl Into<String>) {
        self.writer = writer.into();
    }

    /// URL всех изображений, загруженных за сессию, в порядке загрузки.
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// Загружается ли редактируемый пост.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Идёт ли отправка.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Пост, который нужно загрузить перед редактированием.
    pub fn begin_load(&mut self) -> Option<i64> {
        match self.mode {
            EditorMode::Create => None,
            EditorMode::Update(id) => {
                self.loading = true;
                Some(id)
            }
        }
    }

    /// Заполняет форму загруженным постом.
    ///
    /// При ошибке показывает сообщение и возвращает экран списка.
    pub fn finish_load(
        &mut self,
        outcome: BoardClientResult<Post>,
        editor: &mut dyn RichTextEditor,
        interaction: &dyn Interaction,
    ) -> Option<Route> {
        self.loading = false;
        match outcome {
            Ok(post) => {
                let envelope = ContentEnvelope::decode(&post.content);
                self.title = post.title;
                self.writer = post.writer;
                if envelope.kind == TOAST_KIND && !envelope.html.is_empty() {
                    editor.load_envelope(&envelope);
                }
                self.image_urls = envelope.images;
                None
            }
            Err(err) => {
                error!(mode = ?self.mode, error = %err, "failed to load post for editing");
                interaction.alert(LOAD_ERROR_MESSAGE);
                Some(Route::Listing)
            }
        }
    }

    /// Обрабатывает результат загрузки изображения, вставленного в редактор.
    ///
    /// URL передаётся в редактор и добавляется в список изображений поста.
    pub fn finish_upload(
        &mut self,
        image: &ImageBlob,
        outcome: BoardClientResult<ImageUpload>,
        editor: &mut dyn RichTextEditor,
        interaction: &dyn Interaction,
    ) -> Option<String> {
        match outcome {
            Ok(upload) => {
                editor.insert_image(&upload.url, &image.file_name);
                self.image_urls.push(upload.url.clone());
                Some(upload.url)
            }
            Err(err) => {
                error!(file = %image.file_name, error = %err, "failed to upload image");
                interaction.alert(UPLOAD_ERROR_MESSAGE);
                None
            }
        }
    }

    /// Собирает тело запроса из формы и текущего содержимого редактора.
    pub fn payload(&self, editor: &dyn RichTextEditor) -> PostPayload {
        let envelope =
            ContentEnvelope::new(editor.markdown(), editor.html(), self.image_urls.clone());
        PostPayload {
            title: self.title.clone(),
            writer: self.writer.clone(),
            content: envelope.encode(),
        }
    }

    /// Начинает отправку; `None`, если отправка уже идёт.
    pub fn begin_submit(&mut self, editor: &dyn RichTextEditor) -> Option<PostPayload> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.payload(editor))
    }

    /// Применяет ответ сервера на отправку.
    ///
    /// При успехе возвращает экран для перехода; при ошибке форма остаётся
    /// как есть для повторной попытки.
    pub fn finish_submit(
        &mut self,
        outcome: BoardClientResult<Post>,
        interaction: &dyn Interaction,
    ) -> Option<Route> {
        self.submitting = false;
        let (success, failure) = match self.mode {
            EditorMode::Create => (CREATE_SUCCESS_MESSAGE, CREATE_ERROR_MESSAGE),
            EditorMode::Update(_) => (UPDATE_SUCCESS_MESSAGE, UPDATE_ERROR_MESSAGE),
        };

        match outcome {
            Ok(post) => {
                info!(post_id = post.id, mode = ?self.mode, "post saved");
                interaction.alert(success);
                Some(self.success_route())
            }
            Err(err) => {
                error!(mode = ?self.mode, error = %err, "failed to save post");
                interaction.alert(failure);
                None
            }
        }
    }

    fn success_route(&self) -> Route {
        match self.mode {
            EditorMode::Create => Route::Listing,
            EditorMode::Update(id) => Route::PostDetail(id),
        }
    }

    /// Экран, на который ведёт отмена.
    pub fn cancel_route(&self) -> Route {
        self.success_route()
    }
}

/// Форма поста поверх [`BoardApi`].
pub struct EditorController<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    interaction: &'a dyn Interaction,
    state: EditorState,
}

impl<'a, A: BoardApi + ?Sized> EditorController<'a, A> {
    /// Форма нового поста.
    pub fn for_create(api: &'a A, interaction: &'a dyn Interaction) -> Self {
        Self {
            api,
            interaction,
            state: EditorState::for_create(),
        }
    }

    /// Форма редактирования поста `post_id`.
    pub fn for_update(api: &'a A, interaction: &'a dyn Interaction, post_id: i64) -> Self {
        Self {
            api,
            interaction,
            state: EditorState::for_update(post_id),
        }
    }

    /// Текущее состояние.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Изменяемое состояние (поля формы).
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    /// Загружает редактируемый пост; возвращает экран, если нужно уйти.
    pub async fn load(&mut self, editor: &mut dyn RichTextEditor) -> Option<Route> {
        let id = self.state.begin_load()?;
        let outcome = self.api.get_post(id).await;
        self.state.finish_load(outcome, editor, self.interaction)
    }

    /// Загружает изображение, вставленное в редактор.
    pub async fn insert_image(
        &mut self,
        editor: &mut dyn RichTextEditor,
        image: ImageBlob,
    ) -> Option<String> {
        let outcome = self.api.upload_image(&image).await;
        self.state.finish_upload(&image, outcome, editor, self.interaction)
    }

    /// Отправляет форму; возвращает экран для перехода при успехе.
    pub async fn submit(&mut self, editor: &dyn RichTextEditor) -> Option<Route> {
        let payload = self.state.begin_submit(editor)?;
        let outcome = match self.state.mode() {
            EditorMode::Create => self.api.create_post(&payload).await,
            EditorMode::Update(id) => self.api.update_post(id, &payload).await,
        };
        self.state.finish_submit(outcome, self.interaction)
    }

    /// Отбрасывает всё, что накоплено в форме.
    pub fn cancel(self) -> Route {
        self.state.cancel_route()
    }
}
