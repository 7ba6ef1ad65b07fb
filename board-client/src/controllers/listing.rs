//! Список постов с поиском и блочной пагинацией.
//!
//! Все метаданные пагинации приходят с сервера и хранятся как есть:
//! контроллер не пересчитывает границы блоков, а только проверяет
//! целевую страницу перед переходом.

use tracing::error;

use crate::api::BoardApi;
use crate::date_format::format_date_time;
use crate::error::BoardClientResult;
use crate::models::{PageResult, PostSummary};

/// Сообщение при неудачной загрузке списка.
pub const LOAD_ERROR_MESSAGE: &str = "Не удалось загрузить список постов.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Параметры одного запроса списка.
pub struct ListingQuery {
    /// Индекс страницы (с 0).
    pub page: u32,
    /// Размер страницы.
    pub size: u32,
    /// Ключевое слово; пустое означает обычный список.
    pub keyword: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Кнопка с номером страницы.
pub struct PageButton {
    /// Отображаемый номер (с 1).
    pub number: u32,
    /// Индекс страницы для перехода (с 0).
    pub target: u32,
    /// Текущая страница: кнопка активна и недоступна для нажатия.
    pub current: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Кнопка перехода с целью, заданной сервером.
pub struct NavButton {
    /// Индекс страницы для перехода (с 0).
    pub target: i64,
    /// Доступна ли кнопка.
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Четыре кнопки навигации под таблицей.
pub struct Navigation {
    /// Предыдущий блок.
    pub prev_block: NavButton,
    /// Предыдущая страница.
    pub prev_page: NavButton,
    /// Следующая страница.
    pub next_page: NavButton,
    /// Следующий блок.
    pub next_block: NavButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Строка таблицы с отформатированной датой.
pub struct ListingRow {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Автор.
    pub writer: String,
    /// Дата создания для вывода.
    pub created_at: String,
}

impl From<&PostSummary> for ListingRow {
    fn from(post: &PostSummary) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            writer: post.writer.clone(),
            created_at: format_date_time(post.created_at.as_ref()),
        }
    }
}

#[derive(Debug, Clone)]
/// Состояние экрана списка.
pub struct ListingState {
    page_size: u32,
    keyword_input: String,
    keyword: String,
    result: Option<PageResult>,
    loading: bool,
    error: Option<String>,
}

impl ListingState {
    /// Пустое состояние до первой загрузки.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            keyword_input: String::new(),
            keyword: String::new(),
            result: None,
            loading: false,
            error: None,
        }
    }

    /// Текст в поле поиска.
    pub fn keyword_input(&self) -> &str {
        &self.keyword_input
    }

    /// Меняет текст в поле поиска, не запуская запрос.
    pub fn set_keyword_input(&mut self, keyword: impl Into<String>) {
        self.keyword_input = keyword.into();
    }

    /// Ключевое слово, с которым загружена текущая страница.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Последняя успешно загруженная страница.
    pub fn result(&self) -> Option<&PageResult> {
        self.result.as_ref()
    }

    /// Идёт ли запрос.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Сообщение об ошибке последнего запроса.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Индекс текущей страницы (с 0).
    pub fn current_page(&self) -> u32 {
        self.result.as_ref().map_or(0, |page| page.page)
    }

    /// Общее число страниц.
    pub fn total_pages(&self) -> u32 {
        self.result.as_ref().map_or(0, |page| page.total_pages)
    }

    /// Начинает загрузку страницы.
    ///
    /// Индекс не сверяется с `total_pages`: ответ сервера принимается как есть.
    pub fn begin_load(&mut self, page: u32, keyword: impl Into<String>) -> ListingQuery {
        self.loading = true;
        self.error = None;
        ListingQuery {
            page,
            size: self.page_size,
            keyword: keyword.into(),
        }
    }

    /// Начинает новый поиск по тексту из поля поиска, всегда с первой страницы.
    pub fn begin_search(&mut self) -> ListingQuery {
        let keyword = self.keyword_input.clone();
        self.begin_load(0, keyword)
    }

    /// Проверяет целевую страницу перехода.
    ///
    /// Отрицательный индекс и индекс за последней страницей игнорируются.
    pub fn move_target(&self, target: i64) -> Option<u32> {
        if target < 0 {
            return None;
        }
        let total = i64::from(self.total_pages());
        if total > 0 && target > total - 1 {
            return None;
        }
        u32::try_from(target).ok()
    }

    /// Начинает переход на страницу с текущим ключевым словом.
    pub fn begin_move(&mut self, target: i64) -> Option<ListingQuery> {
        let page = self.move_target(target)?;
        let keyword = self.keyword.clone();
        Some(self.begin_load(page, keyword))
    }

    /// Применяет ответ сервера.
    ///
    /// При ошибке прежняя страница остаётся на экране.
    pub fn finish_load(&mut self, query: ListingQuery, outcome: BoardClientResult<PageResult>) {
        match outcome {
            Ok(page) => {
                self.result = Some(page);
                self.keyword = query.keyword;
            }
            Err(err) => {
                error!(
                    page = query.page,
                    keyword = %query.keyword,
                    error = %err,
                    "failed to load posts"
                );
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }

    /// Строки таблицы текущей страницы.
    pub fn rows(&self) -> Vec<ListingRow> {
        self.result
            .as_ref()
            .map(|page| page.content.iter().map(ListingRow::from).collect())
            .unwrap_or_default()
    }

    /// Нет ни одного поста на странице.
    pub fn is_empty(&self) -> bool {
        self.result.as_ref().is_none_or(|page| page.content.is_empty())
    }

    /// Окно кнопок с номерами страниц `[start_page, end_page]`.
    pub fn page_buttons(&self) -> Vec<PageButton> {
        let Some(page) = self.result.as_ref() else {
            return Vec::new();
        };
        let blocks = &page.blocks;
        if blocks.start_page == 0 {
            return Vec::new();
        }

        (blocks.start_page..=blocks.end_page)
            .map(|number| PageButton {
                number,
                target: number - 1,
                current: number - 1 == page.page,
            })
            .collect()
    }

    /// Кнопки навигации с целями и доступностью из ответа сервера.
    pub fn navigation(&self) -> Navigation {
        let blocks = self
            .result
            .as_ref()
            .map(|page| page.blocks.clone())
            .unwrap_or_default();

        Navigation {
            prev_block: NavButton {
                target: blocks.prev_block_page,
                enabled: blocks.has_prev_block,
            },
            prev_page: NavButton {
                target: blocks.prev_page,
                enabled: blocks.has_prev_page,
            },
            next_page: NavButton {
                target: blocks.next_page,
                enabled: blocks.has_next_page,
            },
            next_block: NavButton {
                target: blocks.next_block_page,
                enabled: blocks.has_next_block,
            },
        }
    }

    /// Строка вида `1 / 3`.
    pub fn page_info(&self) -> String {
        format!("{} / {}", self.current_page() + 1, self.total_pages())
    }
}

/// Экран списка поверх [`BoardApi`].
pub struct ListingController<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    state: ListingState,
}

impl<'a, A: BoardApi + ?Sized> ListingController<'a, A> {
    /// Создаёт контроллер; данные не загружаются.
    pub fn new(api: &'a A, page_size: u32) -> Self {
        Self {
            api,
            state: ListingState::new(page_size),
        }
    }

    /// Текущее состояние.
    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// Меняет текст в поле поиска.
    pub fn set_keyword_input(&mut self, keyword: impl Into<String>) {
        self.state.set_keyword_input(keyword);
    }

    /// Загружает страницу с заданным ключевым словом.
    pub async fn load(&mut self, page: u32, keyword: &str) {
        let query = self.state.begin_load(page, keyword);
        self.run(query).await;
    }

    /// Поиск по тексту из поля поиска с первой страницы.
    pub async fn search(&mut self) {
        let query = self.state.begin_search();
        self.run(query).await;
    }

    /// Переходит на страницу; возвращает `false`, если переход отклонён.
    pub async fn move_page(&mut self, target: i64) -> bool {
        let Some(query) = self.state.begin_move(target) else {
            return false;
        };
        self.run(query).await;
        true
    }

    async fn run(&mut self, query: ListingQuery) {
        let outcome = self
            .api
            .fetch_posts(query.page, query.size, &query.keyword)
            .await;
        self.state.finish_load(query, outcome);
    }
}
