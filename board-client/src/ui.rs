//! Возможности окружения, которые нужны контроллерам: диалоги и редактор.

use crate::content::ContentEnvelope;

/// Блокирующие диалоги с пользователем.
pub trait Interaction {
    /// Запрашивает подтверждение. `false` означает отказ.
    fn confirm(&self, message: &str) -> bool;

    /// Показывает сообщение.
    fn alert(&self, message: &str);
}

/// Редактор форматированного текста.
///
/// Контроллер редактора работает только через этот трейт и не знает,
/// какой виджет стоит за ним.
pub trait RichTextEditor {
    /// Текущее содержимое в markdown.
    fn markdown(&self) -> String;

    /// Текущее содержимое в HTML.
    fn html(&self) -> String;

    /// Заменяет содержимое HTML-фрагментом.
    fn set_html(&mut self, html: &str);

    /// Вставляет загруженное изображение в позицию курсора.
    fn insert_image(&mut self, url: &str, alt: &str);

    /// Заполняет редактор содержимым существующего поста.
    ///
    /// По умолчанию использует HTML-представление конверта.
    fn load_envelope(&mut self, envelope: &ContentEnvelope) {
        self.set_html(&envelope.html);
    }
}
