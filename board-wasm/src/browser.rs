use board_client::{Interaction, Route};
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// Диалоги через `window.confirm` и `window.alert`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BrowserInteraction;

impl Interaction for BrowserInteraction {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Экран по текущему адресу страницы.
pub(crate) fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map_or(Route::Listing, |path| Route::parse(&path))
}

/// Текущий экран приложения и переходы между экранами.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Navigator {
    route: RwSignal<Route>,
}

impl Navigator {
    pub(crate) fn new() -> Self {
        Self {
            route: RwSignal::new(current_route()),
        }
    }

    pub(crate) fn route(&self) -> Route {
        self.route.get()
    }

    /// Переход с новой записью в истории браузера.
    pub(crate) fn navigate(&self, route: Route) {
        if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&route.path()));
        }
        self.route.set(route);
    }

    /// Синхронизация после кнопок «назад»/«вперёд».
    pub(crate) fn sync_with_location(&self) {
        self.route.set(current_route());
    }
}
