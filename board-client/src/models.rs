use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Другие локальные форматы без смещения, которые встречаются в ответах сервера.
const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Момент времени в том виде, в котором его прислал сервер.
///
/// Принимает как RFC 3339 (`2024-01-05T15:04:05+09:00`), так и
/// локальное время без смещения (`2024-01-05T15:04:05.123`, `2024-01-05T15:04`).
/// Для значений со смещением сохраняется «настенное» время в этом смещении.
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Оборачивает готовое локальное время.
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Локальное время без смещения.
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(with_offset.naive_local()));
        }
        LOCAL_FORMATS
            .iter()
            .fold(NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT), |parsed, format| {
                parsed.or_else(|_| NaiveDateTime::parse_from_str(raw, format))
            })
            .map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Дата только для показа: нераспознанное значение или `null` дают `None`,
/// а не ошибку разбора всего ответа.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(value = %raw, error = %err, "unrecognized timestamp");
            Ok(None)
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Автор в свободной форме.
    pub writer: String,
    /// Сериализованный конверт содержимого (см. [`crate::ContentEnvelope`]).
    pub content: String,
    /// Дата и время создания.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    /// Дата и время последнего обновления, если пост менялся.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Строка списка постов: подмножество полей [`Post`].
pub struct PostSummary {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Автор.
    pub writer: String,
    /// Дата и время создания.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Метаданные блочной пагинации, вычисленные сервером.
///
/// Клиент хранит их как есть и не пересчитывает.
pub struct BlockPagination {
    /// Первый номер страницы в текущем блоке (с 1, включительно).
    pub start_page: u32,
    /// Последний номер страницы в текущем блоке (с 1, включительно).
    pub end_page: u32,
    /// Есть ли предыдущая страница.
    pub has_prev_page: bool,
    /// Есть ли следующая страница.
    pub has_next_page: bool,
    /// Есть ли предыдущий блок.
    pub has_prev_block: bool,
    /// Есть ли следующий блок.
    pub has_next_block: bool,
    /// Индекс предыдущей страницы (с 0).
    pub prev_page: i64,
    /// Индекс следующей страницы (с 0).
    pub next_page: i64,
    /// Индекс страницы, на которую ведёт переход к предыдущему блоку (с 0).
    pub prev_block_page: i64,
    /// Индекс страницы, на которую ведёт переход к следующему блоку (с 0).
    pub next_block_page: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Одна страница списка постов.
pub struct PageResult {
    /// Посты на текущей странице; `null` читается как пустой список.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: Vec<PostSummary>,
    /// Индекс страницы (с 0).
    pub page: u32,
    /// Размер страницы.
    pub size: u32,
    /// Общее количество постов.
    #[serde(default)]
    pub total_elements: u64,
    /// Общее количество страниц.
    #[serde(default)]
    pub total_pages: u32,
    /// Блочная пагинация.
    #[serde(flatten)]
    pub blocks: BlockPagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Поля поста, отправляемые при создании и обновлении.
pub struct PostPayload {
    /// Заголовок.
    pub title: String,
    /// Автор.
    pub writer: String,
    /// Сериализованный конверт содержимого.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Ответ на загрузку изображения.
pub struct ImageUpload {
    /// Публичный URL загруженного файла.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Бинарное изображение, вставленное в редактор.
pub struct ImageBlob {
    /// Имя файла (используется как alt-текст).
    pub file_name: String,
    /// MIME-тип.
    pub content_type: String,
    /// Содержимое файла.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Итог очистки изображений, на которые не ссылается ни один пост.
pub struct ImageGcResult {
    /// Сколько файлов изображений найдено всего.
    pub total_image_file_count: u64,
    /// Сколько из них используется постами.
    pub referenced_image_count: u64,
    /// Сколько оказалось «сиротами».
    pub orphan_image_count: u64,
    /// Имена удалённых файлов.
    #[serde(default)]
    pub deleted_file_names: Vec<String>,
}
