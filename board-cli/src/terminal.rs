use std::cell::Cell;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use board_client::{ImageBlob, Interaction};

/// Диалоги в терминале: подтверждение через stdin, сообщения в stdout.
pub struct TerminalInteraction {
    assume_yes: bool,
    declined: Cell<bool>,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            declined: Cell::new(false),
        }
    }

    /// Пользователь ответил отказом хотя бы на один вопрос.
    pub fn declined(&self) -> bool {
        self.declined.get()
    }

    fn ask(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{message} [y/N]: ");
        if io::stdout().flush().is_err() {
            return false;
        }
        read_line().is_some_and(|answer| parse_answer(&answer))
    }
}

impl Interaction for TerminalInteraction {
    fn confirm(&self, message: &str) -> bool {
        let accepted = self.ask(message);
        if !accepted {
            self.declined.set(true);
        }
        accepted
    }

    fn alert(&self, message: &str) {
        println!("{message}");
    }
}

pub fn parse_answer(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
}

/// Читает строку из stdin; `None` на EOF или ошибке чтения.
pub fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

/// Загружает файл изображения с диска.
pub fn read_image(path: &Path) -> Result<ImageBlob> {
    let bytes = fs::read(path).with_context(|| format!("не удалось прочитать {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(ImageBlob {
        file_name,
        content_type,
        bytes,
    })
}

/// Берёт текст из аргумента или из файла; файл важнее.
pub fn read_content(inline: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("не удалось прочитать {}", path.display())),
        None => Ok(inline),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Команда интерактивного просмотра списка.
pub enum BrowseCommand {
    PrevPage,
    NextPage,
    PrevBlock,
    NextBlock,
    /// Номер страницы, как он показан на кнопке (с 1).
    Page(u32),
    Search(String),
    Open(i64),
    Quit,
    Unknown,
}

pub fn parse_browse_command(raw: &str) -> BrowseCommand {
    let raw = raw.trim();
    if let Some(keyword) = raw.strip_prefix('/') {
        return BrowseCommand::Search(keyword.to_string());
    }
    if let Some(id) = raw.strip_prefix('#') {
        return id
            .trim()
            .parse()
            .map_or(BrowseCommand::Unknown, BrowseCommand::Open);
    }

    match raw {
        "p" => BrowseCommand::PrevPage,
        "n" => BrowseCommand::NextPage,
        "<" => BrowseCommand::PrevBlock,
        ">" => BrowseCommand::NextBlock,
        "q" | "" => BrowseCommand::Quit,
        other => other
            .parse()
            .map_or(BrowseCommand::Unknown, BrowseCommand::Page),
    }
}
