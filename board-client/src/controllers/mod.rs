//! Контроллеры экранов.
//!
//! Каждый экран разделён на синхронное состояние (`*State`) с парами
//! `begin_*`/`finish_*` и асинхронный контроллер, который выполняет запрос
//! между ними. Фронтенд с реактивными сигналами использует состояние
//! напрямую, а CLI и тесты используют контроллеры.

pub mod admin;
pub mod detail;
pub mod editor;
pub mod listing;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::{CleanupController, CleanupState, CleanupSummary, DeletedFiles};
pub use detail::{DetailController, DetailMeta, DetailState};
pub use editor::{EditorController, EditorMode, EditorState};
pub use listing::{
    ListingController, ListingQuery, ListingRow, ListingState, NavButton, Navigation, PageButton,
};
