use chrono::Timelike;

use crate::models::Timestamp;

/// Форматирует дату для списка и карточки поста.
///
/// Формат повторяет корейскую локаль браузера:
/// `2024. 01. 05. 오후 03:04`. Отсутствующее значение даёт пустую строку.
pub fn format_date_time(value: Option<&Timestamp>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let naive = value.naive();
    let (is_pm, hour12) = naive.hour12();
    let meridiem = if is_pm { "오후" } else { "오전" };

    format!(
        "{}. {} {:02}:{:02}",
        naive.format("%Y. %m. %d"),
        meridiem,
        hour12,
        naive.minute()
    )
}
