use board_client::controllers::ListingController;
use board_client::{
    BoardApi, BoardClientError, ClientConfig, HttpClient, ImageBlob, PostPayload, RenderedContent,
    content, format_date_time,
};
use httpmock::MockServer;
use serde_json::json;

fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(ClientConfig::with_base_url(server.base_url())).expect("client must build")
}

fn page_body(page: u32, total_pages: u32) -> serde_json::Value {
    json!({
        "content": [
            {"id": 25, "title": "last", "writer": "kim", "createdAt": "2024-01-05T15:04:05"}
        ],
        "page": page,
        "size": 10,
        "totalElements": 25,
        "totalPages": total_pages,
        "startPage": 1,
        "endPage": total_pages,
        "hasPrevPage": page > 0,
        "hasNextPage": page + 1 < total_pages,
        "hasPrevBlock": false,
        "hasNextBlock": false,
        "prevPage": i64::from(page) - 1,
        "nextPage": page + 1,
        "prevBlockPage": 0,
        "nextBlockPage": total_pages
    })
}

#[tokio::test]
async fn blank_keyword_uses_list_endpoint() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/posts")
                .query_param("page", "0")
                .query_param("size", "10");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_body(0, 3));
        })
        .await;

    let client = client(&server);
    let page = client
        .fetch_posts(0, 10, "  ")
        .await
        .expect("list must succeed");

    list.assert_async().await;
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.content[0].writer, "kim");
}

#[tokio::test]
async fn keyword_uses_search_endpoint() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/posts/search")
                .query_param("keyword", "rust")
                .query_param("page", "1")
                .query_param("size", "10");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_body(1, 3));
        })
        .await;

    let client = client(&server);
    client
        .fetch_posts(1, 10, "rust")
        .await
        .expect("search must succeed");

    search.assert_async().await;
}

#[tokio::test]
async fn listing_controller_reads_last_page_navigation() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/posts").query_param("page", "2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_body(2, 3));
        })
        .await;

    let client = client(&server);
    let mut controller = ListingController::new(&client, 10);
    controller.load(2, "").await;

    let nav = controller.state().navigation();
    assert!(!nav.next_page.enabled);
    assert!(nav.prev_page.enabled);
    assert_eq!(controller.state().page_buttons().len(), 3);
    assert!(controller.state().page_buttons()[2].current);
}

#[tokio::test]
async fn create_sends_envelope_payload() {
    let server = MockServer::start_async().await;
    let raw = content::encode("# Hi", "<h1>Hi</h1>", &["http://x/a.png".to_string()]);
    let expected = json!({"title": "Hello", "writer": "kim", "content": raw});
    let create = server
        .mock_async(|when, then| {
            when.method("POST").path("/posts").json_body(expected.clone());
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": 1,
                    "title": "Hello",
                    "writer": "kim",
                    "content": raw,
                    "createdAt": "2024-01-05T15:04:05"
                }));
        })
        .await;

    let client = client(&server);
    let payload = PostPayload {
        title: "Hello".to_string(),
        writer: "kim".to_string(),
        content: raw.clone(),
    };
    let post = client.create_post(&payload).await.expect("create must succeed");

    create.assert_async().await;
    assert_eq!(
        RenderedContent::from_raw(&post.content, Default::default()),
        RenderedContent::Html("<h1>Hi</h1>".to_string())
    );
}

#[tokio::test]
async fn post_with_minutes_only_date_still_loads() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/posts/1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": 1,
                    "title": "t",
                    "writer": "w",
                    "content": "c",
                    "createdAt": "2024-01-05T15:04"
                }));
        })
        .await;

    let client = client(&server);
    let post = client.get_post(1).await.expect("post must decode");
    assert_eq!(
        format_date_time(post.created_at.as_ref()),
        "2024. 01. 05. 오후 03:04"
    );
}

#[tokio::test]
async fn null_page_content_is_an_empty_listing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/posts");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "content": null,
                    "page": 0,
                    "size": 10,
                    "totalElements": 0,
                    "totalPages": 0
                }));
        })
        .await;

    let client = client(&server);
    let mut controller = ListingController::new(&client, 10);
    controller.load(0, "").await;

    assert!(controller.state().error().is_none());
    assert!(controller.state().is_empty());
}

#[tokio::test]
async fn unreachable_backend_maps_to_network() {
    let client = HttpClient::new(ClientConfig::with_base_url("http://127.0.0.1:1"))
        .expect("client must build");
    let err = client.get_post(1).await.expect_err("backend is down");
    assert!(matches!(err, BoardClientError::Network(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn update_and_delete_hit_post_path() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method("PUT").path("/posts/7");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": 7,
                    "title": "t",
                    "writer": "w",
                    "content": "c",
                    "createdAt": "2024-01-05T15:04:05",
                    "updatedAt": "2024-01-06T10:00:00"
                }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method("DELETE").path("/posts/7");
            then.status(204);
        })
        .await;

    let client = client(&server);
    let payload = PostPayload {
        title: "t".to_string(),
        writer: "w".to_string(),
        content: "c".to_string(),
    };
    let updated = client.update_post(7, &payload).await.expect("update must succeed");
    assert!(updated.updated_at.is_some());

    client.delete_post(7).await.expect("delete must succeed");

    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn upload_posts_multipart_file_field() {
    let server = MockServer::start_async().await;
    let upload = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/posts/images")
                .body_includes("name=\"file\"")
                .body_includes("filename=\"a.png\"")
                .body_includes("fake-image-bytes");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"url": "http://localhost:9090/images/editor/a.png"}));
        })
        .await;

    let client = client(&server);
    let image = ImageBlob {
        file_name: "a.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: b"fake-image-bytes".to_vec(),
    };
    let uploaded = client.upload_image(&image).await.expect("upload must succeed");

    upload.assert_async().await;
    assert_eq!(uploaded.url, "http://localhost:9090/images/editor/a.png");
}

#[tokio::test]
async fn cleanup_reads_gc_result() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("DELETE").path("/admin/images/cleanup");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "totalImageFileCount": 5,
                    "referencedImageCount": 3,
                    "orphanImageCount": 2,
                    "deletedFileNames": []
                }));
        })
        .await;

    let client = client(&server);
    let result = client.cleanup_orphan_images().await.expect("cleanup must succeed");
    assert_eq!(result.orphan_image_count, 2);
    assert!(result.deleted_file_names.is_empty());
}

#[tokio::test]
async fn missing_post_maps_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/posts/404");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(json!({"status": 404, "error": "Not Found", "message": "post 404 not found"}));
        })
        .await;

    let client = client(&server);
    let err = client.get_post(404).await.expect_err("post must be missing");
    assert!(matches!(err, BoardClientError::NotFound));
}

#[tokio::test]
async fn server_error_keeps_body_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/posts");
            then.status(500)
                .header("content-type", "application/json")
                .json_body(json!({"error": "Internal Server Error", "message": "db down"}));
        })
        .await;

    let client = client(&server);
    let err = client.fetch_posts(0, 10, "").await.expect_err("must fail");
    match err {
        BoardClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
