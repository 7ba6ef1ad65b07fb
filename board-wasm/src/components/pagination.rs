use board_client::controllers::{ListingState, NavButton};
use leptos::prelude::*;

/// Блочная пагинация списка: «<<», «<», номера страниц блока, «>», «>>».
#[component]
pub(crate) fn Pagination(state: RwSignal<ListingState>, on_move: Callback<i64>) -> impl IntoView {
    let nav_button = move |label: &'static str, pick: fn(&ListingState) -> NavButton| {
        view! {
            <button
                class="page-nav"
                disabled=move || !state.with(|s| pick(s).enabled) || state.with(ListingState::is_loading)
                on:click=move |_| on_move.run(state.with(|s| pick(s).target))
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="pagination">
            {nav_button("<<", |s| s.navigation().prev_block)}
            {nav_button("<", |s| s.navigation().prev_page)}

            <For
                each=move || state.with(ListingState::page_buttons)
                key=|button| (button.target, button.current)
                children=move |button| {
                    view! {
                        <button
                            class:current=button.current
                            disabled=move || button.current || state.with(ListingState::is_loading)
                            on:click=move |_| on_move.run(i64::from(button.target))
                        >
                            {button.number}
                        </button>
                    }
                }
            />

            {nav_button(">", |s| s.navigation().next_page)}
            {nav_button(">>", |s| s.navigation().next_block)}

            <span class="page-info">{move || state.with(ListingState::page_info)}</span>
        </nav>
    }
}
