use board_client::controllers::editor::UPLOAD_ERROR_MESSAGE;
use board_client::controllers::{EditorMode, EditorState};
use board_client::{Interaction, MarkdownEditor, RichTextEditor};
use leptos::ev::{Event, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::api;
use crate::browser::{BrowserInteraction, Navigator};
use crate::upload;

/// Форма создания (`post_id = None`) или редактирования поста.
#[component]
pub(crate) fn PostEditor(navigator: Navigator, post_id: Option<i64>) -> impl IntoView {
    let form = RwSignal::new(match post_id {
        Some(id) => EditorState::for_update(id),
        None => EditorState::for_create(),
    });
    let editor = RwSignal::new(MarkdownEditor::new());

    if let Some(Some(id)) = form.try_update(EditorState::begin_load) {
        spawn_local(async move {
            let outcome = api::get_post(id).await;
            let leave = editor
                .try_update(|ed| {
                    form.try_update(|s| s.finish_load(outcome, ed, &BrowserInteraction))
                })
                .flatten()
                .flatten();
            if let Some(route) = leave {
                navigator.navigate(route);
            }
        });
    }

    let on_image = move |ev: Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");

        spawn_local(async move {
            let Ok(buffer) = JsFuture::from(file.array_buffer()).await else {
                BrowserInteraction.alert(UPLOAD_ERROR_MESSAGE);
                return;
            };
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
            let image = upload::image_blob(file.name(), file.type_(), bytes);

            let outcome = api::upload_image(&image).await;
            editor.update(|ed| {
                form.update(|s| {
                    s.finish_upload(&image, outcome, ed, &BrowserInteraction);
                });
            });
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let submitted = editor.with_untracked(|ed| form.try_update(|s| s.begin_submit(ed)));
        let Some(Some(payload)) = submitted else {
            return;
        };
        let target = match form.with_untracked(EditorState::mode) {
            EditorMode::Create => None,
            EditorMode::Update(id) => Some(id),
        };

        spawn_local(async move {
            let outcome = api::save_post(target, &payload).await;
            let next = form.try_update(|s| s.finish_submit(outcome, &BrowserInteraction));
            if let Some(Some(route)) = next {
                navigator.navigate(route);
            }
        });
    };

    let busy = move || form.with(|s| s.is_loading() || s.is_submitting());

    view! {
        <form class="post-editor" on:submit=on_submit>
            <h2>{if post_id.is_some() { "Редактирование поста" } else { "Новый пост" }}</h2>

            <input
                placeholder="Заголовок"
                prop:value=move || form.with(|s| s.title().to_string())
                on:input=move |ev| form.update(|s| s.set_title(event_target_value(&ev)))
            />
            <input
                placeholder="Автор"
                prop:value=move || form.with(|s| s.writer().to_string())
                on:input=move |ev| form.update(|s| s.set_writer(event_target_value(&ev)))
            />

            <div class="editor">
                <textarea
                    rows="16"
                    prop:value=move || editor.with(RichTextEditor::markdown)
                    on:input=move |ev| editor.update(|ed| ed.set_markdown(event_target_value(&ev)))
                ></textarea>
                <div class="preview" inner_html=move || editor.with(RichTextEditor::html)></div>
            </div>

            <label class="image-upload">
                "Вставить изображение: "
                <input type="file" accept="image/*" on:change=on_image disabled=busy />
            </label>

            <ul class="image-urls">
                <For
                    each=move || form.with(|s| s.image_urls().to_vec())
                    key=|url| url.clone()
                    children=|url| view! { <li>{url}</li> }
                />
            </ul>

            <div class="actions">
                <button type="submit" disabled=busy>"Сохранить"</button>
                <button
                    type="button"
                    on:click=move |_| navigator.navigate(form.with_untracked(EditorState::cancel_route))
                >
                    "Отмена"
                </button>
            </div>
        </form>
    }
}
