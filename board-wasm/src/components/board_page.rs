use board_client::Route;
use board_client::controllers::{ListingQuery, ListingState};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::Navigator;
use crate::components::pagination::Pagination;

fn load(state: RwSignal<ListingState>, query: ListingQuery) {
    spawn_local(async move {
        let outcome = api::fetch_posts(&query).await;
        state.update(|s| s.finish_load(query, outcome));
    });
}

#[component]
pub(crate) fn BoardPage(navigator: Navigator) -> impl IntoView {
    let state = RwSignal::new(ListingState::new(api::config().page_size));

    if let Some(query) = state.try_update(|s| s.begin_load(0, "")) {
        load(state, query);
    }

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        if let Some(query) = state.try_update(ListingState::begin_search) {
            load(state, query);
        }
    };

    let on_move = Callback::new(move |target: i64| {
        if let Some(Some(query)) = state.try_update(|s| s.begin_move(target)) {
            load(state, query);
        }
    });

    view! {
        <section class="board">
            <form class="search" on:submit=on_search>
                <input
                    placeholder="Поиск по заголовку и тексту"
                    prop:value=move || state.with(|s| s.keyword_input().to_string())
                    on:input=move |ev| state.update(|s| s.set_keyword_input(event_target_value(&ev)))
                />
                <button type="submit" disabled=move || state.with(ListingState::is_loading)>
                    "Найти"
                </button>
            </form>

            <Show when=move || state.with(|s| s.error().is_some())>
                <div class="error-banner">{move || state.with(|s| s.error().unwrap_or_default().to_string())}</div>
            </Show>

            <table class="posts">
                <thead>
                    <tr>
                        <th>"№"</th>
                        <th>"Заголовок"</th>
                        <th>"Автор"</th>
                        <th>"Дата"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || state.with(|s| s.result().is_some() && s.is_empty())>
                        <tr>
                            <td colspan="4">"Постов нет."</td>
                        </tr>
                    </Show>
                    <For
                        each=move || state.with(ListingState::rows)
                        key=|row| row.id
                        children=move |row| {
                            let id = row.id;
                            view! {
                                <tr class="post-row" on:click=move |_| navigator.navigate(Route::PostDetail(id))>
                                    <td>{row.id}</td>
                                    <td>{row.title}</td>
                                    <td>{row.writer}</td>
                                    <td>{row.created_at}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Pagination state=state on_move=on_move />

            <div class="actions">
                <button on:click=move |_| navigator.navigate(Route::CreatePost)>"Написать"</button>
                <button on:click=move |_| navigator.navigate(Route::AdminImageCleanup)>
                    "Очистка изображений"
                </button>
            </div>
        </section>
    }
}
