use std::cell::RefCell;

use board_client::controllers::ListingQuery;
use board_client::{
    BoardApi, BoardClientResult, ClientConfig, HttpClient, ImageBlob, ImageGcResult, ImageUpload,
    PageResult, Post, PostPayload,
};

const API_BASE_URL: &str = match option_env!("BOARD_API_BASE_URL") {
    Some(value) => value,
    None => board_client::DEFAULT_BASE_URL,
};

thread_local! {
    static CLIENT: RefCell<Option<HttpClient>> = const { RefCell::new(None) };
}

pub(crate) fn config() -> ClientConfig {
    ClientConfig::with_base_url(API_BASE_URL)
}

fn client() -> BoardClientResult<HttpClient> {
    CLIENT.with(|cell| {
        if let Some(client) = cell.borrow().as_ref() {
            return Ok(client.clone());
        }
        let client = HttpClient::new(config())?;
        *cell.borrow_mut() = Some(client.clone());
        Ok(client)
    })
}

pub(crate) async fn fetch_posts(query: &ListingQuery) -> BoardClientResult<PageResult> {
    client()?
        .fetch_posts(query.page, query.size, &query.keyword)
        .await
}

pub(crate) async fn get_post(id: i64) -> BoardClientResult<Post> {
    client()?.get_post(id).await
}

pub(crate) async fn save_post(id: Option<i64>, payload: &PostPayload) -> BoardClientResult<Post> {
    let client = client()?;
    match id {
        Some(id) => client.update_post(id, payload).await,
        None => client.create_post(payload).await,
    }
}

pub(crate) async fn delete_post(id: i64) -> BoardClientResult<()> {
    client()?.delete_post(id).await
}

pub(crate) async fn upload_image(image: &ImageBlob) -> BoardClientResult<ImageUpload> {
    client()?.upload_image(image).await
}

pub(crate) async fn cleanup_orphan_images() -> BoardClientResult<ImageGcResult> {
    client()?.cleanup_orphan_images().await
}
