use board_client::Route;
use leptos::prelude::*;

use crate::browser::Navigator;
use crate::components::admin_cleanup::AdminCleanup;
use crate::components::board_page::BoardPage;
use crate::components::post_detail::PostDetail;
use crate::components::post_editor::PostEditor;

#[component]
pub fn App() -> impl IntoView {
    let navigator = Navigator::new();

    // Приложение живёт всё время жизни страницы, слушатель не снимается.
    let _ = window_event_listener(leptos::ev::popstate, move |_| {
        navigator.sync_with_location();
    });

    view! {
        <main class="page">
            <section class="container">
                <header>
                    <h1>
                        <a href="/" on:click=move |ev| {
                            ev.prevent_default();
                            navigator.navigate(Route::Listing);
                        }>"Доска объявлений"</a>
                    </h1>
                </header>

                {move || match navigator.route() {
                    Route::Listing => view! { <BoardPage navigator=navigator /> }.into_any(),
                    Route::CreatePost => view! { <PostEditor navigator=navigator post_id=None /> }.into_any(),
                    Route::EditPost(id) => view! { <PostEditor navigator=navigator post_id=Some(id) /> }.into_any(),
                    Route::PostDetail(id) => view! { <PostDetail navigator=navigator post_id=id /> }.into_any(),
                    Route::AdminImageCleanup => view! { <AdminCleanup /> }.into_any(),
                    Route::NotFound => view! { <p>"Страница не найдена."</p> }.into_any(),
                }}
            </section>
        </main>
    }
}
