use std::time::{SystemTime, UNIX_EPOCH};

use board_client::{
    BoardApi, BoardClientError, ClientConfig, ContentEnvelope, HttpClient, PostPayload,
};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running board backend"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("BOARD_HTTP_URL").unwrap_or_else(|_| "http://localhost:9090".to_string());
    let client = HttpClient::new(ClientConfig::with_base_url(base_url)).expect("client must build");

    let suffix = unique_suffix();
    let title = format!("smoke {suffix}");
    let content = ContentEnvelope::new("# smoke", "<h1>smoke</h1>", Vec::new()).encode();

    let created = client
        .create_post(&PostPayload {
            title: title.clone(),
            writer: "smoke".to_string(),
            content: content.clone(),
        })
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title, title);

    let fetched = client
        .get_post(created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(ContentEnvelope::decode(&fetched.content).html, "<h1>smoke</h1>");

    let found = client
        .fetch_posts(0, 10, &suffix)
        .await
        .expect("search must succeed");
    assert!(found.content.iter().any(|post| post.id == created.id));

    let updated = client
        .update_post(
            created.id,
            &PostPayload {
                title: format!("{title} updated"),
                writer: "smoke".to_string(),
                content,
            },
        )
        .await
        .expect("update_post must succeed");
    assert_eq!(updated.id, created.id);

    client
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");

    let after_delete = client.get_post(created.id).await;
    assert!(matches!(after_delete, Err(BoardClientError::NotFound)));
}
