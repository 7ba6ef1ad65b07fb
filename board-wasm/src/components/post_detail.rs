use board_client::controllers::DetailState;
use board_client::{RenderedContent, Route};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::{BrowserInteraction, Navigator};

#[component]
pub(crate) fn PostDetail(navigator: Navigator, post_id: i64) -> impl IntoView {
    let state = RwSignal::new(DetailState::new(post_id, api::config().html_policy));

    if let Some(id) = state.try_update(DetailState::begin_load) {
        spawn_local(async move {
            let outcome = api::get_post(id).await;
            state.update(|s| s.finish_load(outcome));
        });
    }

    let on_delete = move |_| {
        let Some(Some(id)) = state.try_update(|s| s.begin_delete(&BrowserInteraction)) else {
            return;
        };
        spawn_local(async move {
            let outcome = api::delete_post(id).await;
            let next = state.try_update(|s| s.finish_delete(outcome, &BrowserInteraction));
            if let Some(Some(route)) = next {
                navigator.navigate(route);
            }
        });
    };

    let content = move || match state.with(DetailState::rendered_content) {
        Some(RenderedContent::Html(html)) => view! { <div class="post-content" inner_html=html></div> }.into_any(),
        Some(RenderedContent::Text(text)) => view! { <pre class="post-content">{text}</pre> }.into_any(),
        None => ().into_any(),
    };

    view! {
        <article class="post-detail">
            <Show when=move || state.with(DetailState::is_loading)>
                <p>"Загрузка..."</p>
            </Show>
            <Show when=move || state.with(|s| s.error().is_some())>
                <div class="error-banner">{move || state.with(|s| s.error().unwrap_or_default().to_string())}</div>
            </Show>

            <h2>{move || state.with(|s| s.post().map(|post| post.title.clone()).unwrap_or_default())}</h2>
            {move || state.with(DetailState::meta).map(|meta| view! {
                <p class="meta">
                    <span>"Автор: " {meta.writer}</span>
                    " · "
                    <span>"Создан: " {meta.created_at}</span>
                    {meta.updated_at.map(|updated| view! { <span>" · Изменён: " {updated}</span> })}
                </p>
            })}

            {content}

            <div class="actions">
                <button
                    disabled=move || !state.with(DetailState::controls_enabled)
                    on:click=move |_| navigator.navigate(state.with(DetailState::edit_route))
                >
                    "Редактировать"
                </button>
                <button disabled=move || !state.with(DetailState::controls_enabled) on:click=on_delete>
                    "Удалить"
                </button>
                <button on:click=move |_| navigator.navigate(Route::Listing)>"К списку"</button>
            </div>
        </article>
    }
}
