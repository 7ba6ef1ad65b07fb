use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::BoardApi;
use crate::error::{BoardClientError, BoardClientResult};
use crate::models::{
    BlockPagination, ImageBlob, ImageGcResult, ImageUpload, PageResult, Post, PostPayload,
    PostSummary,
};
use crate::ui::{Interaction, RichTextEditor};

type Queue<T> = Arc<Mutex<VecDeque<BoardClientResult<T>>>>;

fn pop<T>(queue: &Queue<T>, what: &str) -> BoardClientResult<T> {
    queue
        .lock()
        .expect("queue mutex poisoned")
        .pop_front()
        .unwrap_or_else(|| panic!("unexpected {what} call"))
}

#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    pages: Queue<PageResult>,
    posts: Queue<Post>,
    saved: Queue<Post>,
    deletes: Queue<()>,
    uploads: Queue<ImageUpload>,
    cleanups: Queue<ImageGcResult>,
    fetch_calls: Arc<Mutex<Vec<(u32, u32, String)>>>,
    get_calls: Arc<Mutex<Vec<i64>>>,
    create_calls: Arc<Mutex<Vec<PostPayload>>>,
    update_calls: Arc<Mutex<Vec<(i64, PostPayload)>>>,
    delete_calls: Arc<Mutex<Vec<i64>>>,
    upload_calls: Arc<Mutex<Vec<String>>>,
    cleanup_calls: Arc<Mutex<usize>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_page(&self, page: PageResult) {
        self.pages.lock().expect("pages mutex poisoned").push_back(Ok(page));
    }

    pub(crate) fn push_page_error(&self, err: BoardClientError) {
        self.pages.lock().expect("pages mutex poisoned").push_back(Err(err));
    }

    pub(crate) fn push_post(&self, post: BoardClientResult<Post>) {
        self.posts.lock().expect("posts mutex poisoned").push_back(post);
    }

    pub(crate) fn push_saved(&self, post: BoardClientResult<Post>) {
        self.saved.lock().expect("saved mutex poisoned").push_back(post);
    }

    pub(crate) fn push_delete(&self, outcome: BoardClientResult<()>) {
        self.deletes.lock().expect("deletes mutex poisoned").push_back(outcome);
    }

    pub(crate) fn push_upload(&self, outcome: BoardClientResult<ImageUpload>) {
        self.uploads.lock().expect("uploads mutex poisoned").push_back(outcome);
    }

    pub(crate) fn push_cleanup(&self, outcome: BoardClientResult<ImageGcResult>) {
        self.cleanups.lock().expect("cleanups mutex poisoned").push_back(outcome);
    }

    pub(crate) fn fetch_calls(&self) -> Vec<(u32, u32, String)> {
        self.fetch_calls.lock().expect("fetch_calls mutex poisoned").clone()
    }

    pub(crate) fn get_calls(&self) -> Vec<i64> {
        self.get_calls.lock().expect("get_calls mutex poisoned").clone()
    }

    pub(crate) fn create_calls(&self) -> Vec<PostPayload> {
        self.create_calls.lock().expect("create_calls mutex poisoned").clone()
    }

    pub(crate) fn update_calls(&self) -> Vec<(i64, PostPayload)> {
        self.update_calls.lock().expect("update_calls mutex poisoned").clone()
    }

    pub(crate) fn delete_calls(&self) -> Vec<i64> {
        self.delete_calls.lock().expect("delete_calls mutex poisoned").clone()
    }

    pub(crate) fn upload_calls(&self) -> Vec<String> {
        self.upload_calls.lock().expect("upload_calls mutex poisoned").clone()
    }

    pub(crate) fn cleanup_calls(&self) -> usize {
        *self.cleanup_calls.lock().expect("cleanup_calls mutex poisoned")
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.fetch_calls().len()
            + self.get_calls().len()
            + self.create_calls().len()
            + self.update_calls().len()
            + self.delete_calls().len()
            + self.upload_calls().len()
            + self.cleanup_calls()
    }
}

#[async_trait(?Send)]
impl BoardApi for FakeApi {
    async fn fetch_posts(
        &self,
        page: u32,
        size: u32,
        keyword: &str,
    ) -> BoardClientResult<PageResult> {
        self.fetch_calls
            .lock()
            .expect("fetch_calls mutex poisoned")
            .push((page, size, keyword.to_string()));
        pop(&self.pages, "fetch_posts")
    }

    async fn get_post(&self, id: i64) -> BoardClientResult<Post> {
        self.get_calls.lock().expect("get_calls mutex poisoned").push(id);
        pop(&self.posts, "get_post")
    }

    async fn create_post(&self, payload: &PostPayload) -> BoardClientResult<Post> {
        self.create_calls
            .lock()
            .expect("create_calls mutex poisoned")
            .push(payload.clone());
        pop(&self.saved, "create_post")
    }

    async fn update_post(&self, id: i64, payload: &PostPayload) -> BoardClientResult<Post> {
        self.update_calls
            .lock()
            .expect("update_calls mutex poisoned")
            .push((id, payload.clone()));
        pop(&self.saved, "update_post")
    }

    async fn delete_post(&self, id: i64) -> BoardClientResult<()> {
        self.delete_calls.lock().expect("delete_calls mutex poisoned").push(id);
        pop(&self.deletes, "delete_post")
    }

    async fn upload_image(&self, image: &ImageBlob) -> BoardClientResult<ImageUpload> {
        self.upload_calls
            .lock()
            .expect("upload_calls mutex poisoned")
            .push(image.file_name.clone());
        pop(&self.uploads, "upload_image")
    }

    async fn cleanup_orphan_images(&self) -> BoardClientResult<ImageGcResult> {
        *self.cleanup_calls.lock().expect("cleanup_calls mutex poisoned") += 1;
        pop(&self.cleanups, "cleanup_orphan_images")
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeInteraction {
    answer: bool,
    confirms: Arc<Mutex<Vec<String>>>,
    alerts: Arc<Mutex<Vec<String>>>,
}

impl FakeInteraction {
    pub(crate) fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub(crate) fn declining() -> Self {
        Self::default()
    }

    pub(crate) fn confirms(&self) -> Vec<String> {
        self.confirms.lock().expect("confirms mutex poisoned").clone()
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts mutex poisoned").clone()
    }
}

impl Interaction for FakeInteraction {
    fn confirm(&self, message: &str) -> bool {
        self.confirms
            .lock()
            .expect("confirms mutex poisoned")
            .push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .expect("alerts mutex poisoned")
            .push(message.to_string());
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeEditor {
    pub(crate) markdown: String,
    pub(crate) html: String,
    pub(crate) inserted: Vec<(String, String)>,
}

impl RichTextEditor for FakeEditor {
    fn markdown(&self) -> String {
        self.markdown.clone()
    }

    fn html(&self) -> String {
        self.html.clone()
    }

    fn set_html(&mut self, html: &str) {
        self.html = html.to_string();
    }

    fn insert_image(&mut self, url: &str, alt: &str) {
        self.inserted.push((url.to_string(), alt.to_string()));
    }
}

/// Страница в том виде, в каком её отдаёт сервер: один блок на все страницы.
pub(crate) fn page_result(
    page: u32,
    size: u32,
    total_elements: u64,
    total_pages: u32,
    rows: usize,
) -> PageResult {
    let content = (0..rows)
        .map(|i| PostSummary {
            id: i as i64 + 1,
            title: format!("title {i}"),
            writer: "writer".to_string(),
            created_at: Some("2024-01-05T15:04:05".parse().expect("valid timestamp")),
        })
        .collect();

    let page_i = i64::from(page);
    let total_i = i64::from(total_pages);
    PageResult {
        content,
        page,
        size,
        total_elements,
        total_pages,
        blocks: BlockPagination {
            start_page: 1,
            end_page: total_pages,
            has_prev_page: page_i > 0,
            has_next_page: page_i < total_i - 1,
            has_prev_block: false,
            has_next_block: false,
            prev_page: page_i - 1,
            next_page: page_i + 1,
            prev_block_page: 0,
            next_block_page: total_i,
        },
    }
}

pub(crate) fn sample_post(id: i64, content: &str) -> Post {
    Post {
        id,
        title: format!("title {id}"),
        writer: "writer".to_string(),
        content: content.to_string(),
        created_at: Some("2024-01-05T15:04:05".parse().expect("valid timestamp")),
        updated_at: None,
    }
}
