use comrak::options::Options;

use crate::content::ContentEnvelope;
use crate::ui::RichTextEditor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Редактор на markdown-буфере.
///
/// HTML строится из буфера через `comrak`; сырой HTML внутри markdown
/// проходит без изменений, поэтому `set_html` просто кладёт фрагмент в буфер.
pub struct MarkdownEditor {
    buffer: String,
}

impl MarkdownEditor {
    /// Пустой редактор.
    pub fn new() -> Self {
        Self::default()
    }

    /// Редактор с начальным markdown.
    pub fn with_markdown(markdown: impl Into<String>) -> Self {
        Self {
            buffer: markdown.into(),
        }
    }

    /// Заменяет буфер целиком (ввод пользователя).
    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        self.buffer = markdown.into();
    }
}

fn render_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.render.r#unsafe = true;
    options
}

impl RichTextEditor for MarkdownEditor {
    fn markdown(&self) -> String {
        self.buffer.clone()
    }

    fn html(&self) -> String {
        if self.buffer.trim().is_empty() {
            return String::new();
        }
        comrak::markdown_to_html(&self.buffer, &render_options())
    }

    fn set_html(&mut self, html: &str) {
        self.buffer = html.to_string();
    }

    fn insert_image(&mut self, url: &str, alt: &str) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer.push_str(&format!("![{alt}]({url})\n"));
    }

    fn load_envelope(&mut self, envelope: &ContentEnvelope) {
        if envelope.markdown.is_empty() {
            self.set_html(&envelope.html);
        } else {
            self.buffer = envelope.markdown.clone();
        }
    }
}
