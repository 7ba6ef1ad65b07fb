use board_client::controllers::admin::NO_FILES_DELETED_MESSAGE;
use board_client::controllers::{CleanupState, DeletedFiles};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::BrowserInteraction;

#[component]
pub(crate) fn AdminCleanup() -> impl IntoView {
    let state = RwSignal::new(CleanupState::new());

    let on_run = move |_| {
        if state.try_update(|s| s.begin_cleanup(&BrowserInteraction)) != Some(true) {
            return;
        }
        spawn_local(async move {
            let outcome = api::cleanup_orphan_images().await;
            state.update(|s| s.finish_cleanup(outcome, &BrowserInteraction));
        });
    };

    view! {
        <section class="admin-cleanup">
            <h2>"Очистка изображений"</h2>
            <Show when=move || state.with(CleanupState::shows_prompt)>
                <p>"Будут удалены файлы изображений, на которые не ссылается ни один пост."</p>
            </Show>

            <button disabled=move || state.with(CleanupState::is_running) on:click=on_run>
                {move || if state.with(CleanupState::is_running) { "Выполняется..." } else { "Запустить очистку" }}
            </button>

            <Show when=move || state.with(|s| s.error().is_some())>
                <div class="error-banner">{move || state.with(|s| s.error().unwrap_or_default().to_string())}</div>
            </Show>

            {move || state.with(CleanupState::summary).map(|summary| view! {
                <dl class="cleanup-summary">
                    <dt>"Всего файлов"</dt>
                    <dd>{summary.total_image_file_count}</dd>
                    <dt>"Используются"</dt>
                    <dd>{summary.referenced_image_count}</dd>
                    <dt>"Неиспользуемые"</dt>
                    <dd>{summary.orphan_image_count}</dd>
                </dl>
                {match summary.deleted {
                    DeletedFiles::Nothing => view! { <p>{NO_FILES_DELETED_MESSAGE}</p> }.into_any(),
                    DeletedFiles::Files(names) => view! {
                        <ul class="deleted-files">
                            {names.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}
                        </ul>
                    }.into_any(),
                }}
            })}
        </section>
    }
}
