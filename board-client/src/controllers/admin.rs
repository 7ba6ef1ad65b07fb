//! Очистка изображений, на которые не ссылается ни один пост.

use tracing::{error, info};

use crate::api::BoardApi;
use crate::error::BoardClientResult;
use crate::models::ImageGcResult;
use crate::ui::Interaction;

/// Вопрос перед очисткой.
pub const CLEANUP_CONFIRM_MESSAGE: &str = "Удалить изображения, которые не используются ни в одном посте?\n\
(Изображения из существующих постов не удаляются.)";
/// Сообщение после успешной очистки.
pub const CLEANUP_SUCCESS_MESSAGE: &str = "Очистка изображений завершена.";
/// Сообщение при неудачной очистке.
pub const CLEANUP_ERROR_MESSAGE: &str = "Не удалось выполнить очистку изображений.";
/// Пометка вместо пустого списка удалённых файлов.
pub const NO_FILES_DELETED_MESSAGE: &str = "Удалённых файлов нет.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Список удалённых файлов для вывода.
pub enum DeletedFiles {
    /// Ничего не удалено.
    Nothing,
    /// Имена удалённых файлов.
    Files(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Итоги очистки для вывода.
pub struct CleanupSummary {
    /// Всего файлов изображений.
    pub total_image_file_count: u64,
    /// Используется постами.
    pub referenced_image_count: u64,
    /// Не используется.
    pub orphan_image_count: u64,
    /// Что удалено.
    pub deleted: DeletedFiles,
}

impl From<&ImageGcResult> for CleanupSummary {
    fn from(result: &ImageGcResult) -> Self {
        let deleted = if result.deleted_file_names.is_empty() {
            DeletedFiles::Nothing
        } else {
            DeletedFiles::Files(result.deleted_file_names.clone())
        };
        Self {
            total_image_file_count: result.total_image_file_count,
            referenced_image_count: result.referenced_image_count,
            orphan_image_count: result.orphan_image_count,
            deleted,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Состояние экрана очистки.
///
/// Пока результата нет, показывается приглашение с кнопкой запуска.
pub struct CleanupState {
    result: Option<ImageGcResult>,
    running: bool,
    error: Option<String>,
}

impl CleanupState {
    /// Начальное состояние с приглашением.
    pub fn new() -> Self {
        Self::default()
    }

    /// Идёт ли очистка.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Сообщение об ошибке последнего запуска.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Показывать ли приглашение (результата ещё нет).
    pub fn shows_prompt(&self) -> bool {
        self.result.is_none()
    }

    /// Ответ сервера.
    pub fn result(&self) -> Option<&ImageGcResult> {
        self.result.as_ref()
    }

    /// Итоги для вывода.
    pub fn summary(&self) -> Option<CleanupSummary> {
        self.result.as_ref().map(CleanupSummary::from)
    }

    /// Спрашивает подтверждение; `false`, если запускать не нужно.
    pub fn begin_cleanup(&mut self, interaction: &dyn Interaction) -> bool {
        if self.running {
            return false;
        }
        if !interaction.confirm(CLEANUP_CONFIRM_MESSAGE) {
            return false;
        }
        self.running = true;
        self.error = None;
        true
    }

    /// Применяет ответ сервера.
    pub fn finish_cleanup(
        &mut self,
        outcome: BoardClientResult<ImageGcResult>,
        interaction: &dyn Interaction,
    ) {
        self.running = false;
        match outcome {
            Ok(result) => {
                info!(
                    orphans = result.orphan_image_count,
                    deleted = result.deleted_file_names.len(),
                    "orphan images cleaned up"
                );
                self.result = Some(result);
                interaction.alert(CLEANUP_SUCCESS_MESSAGE);
            }
            Err(err) => {
                error!(error = %err, "failed to clean up orphan images");
                self.error = Some(CLEANUP_ERROR_MESSAGE.to_string());
            }
        }
    }
}

/// Экран очистки изображений поверх [`BoardApi`].
pub struct CleanupController<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    interaction: &'a dyn Interaction,
    state: CleanupState,
}

impl<'a, A: BoardApi + ?Sized> CleanupController<'a, A> {
    /// Создаёт контроллер.
    pub fn new(api: &'a A, interaction: &'a dyn Interaction) -> Self {
        Self {
            api,
            interaction,
            state: CleanupState::new(),
        }
    }

    /// Текущее состояние.
    pub fn state(&self) -> &CleanupState {
        &self.state
    }

    /// Запускает очистку после подтверждения.
    pub async fn run_cleanup(&mut self) {
        if !self.state.begin_cleanup(self.interaction) {
            return;
        }
        let outcome = self.api.cleanup_orphan_images().await;
        self.state.finish_cleanup(outcome, self.interaction);
    }
}
