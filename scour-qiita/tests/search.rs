use scour_qiita::{FetchError, QiitaApi};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn item(title: &str, likes: u64) -> serde_json::Value {
    json!({
        "title": title,
        "created_at": "2022-03-13T10:00:00+09:00",
        "user": {"id": "author", "name": "Author"},
        "likes_count": likes
    })
}

async fn client_for(server: &MockServer) -> QiitaApi {
    QiitaApi::with_base(&server.uri(), "test-token".into()).unwrap()
}

#[tokio::test]
async fn golang_search_keeps_three_of_four_entries_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .and(query_param("query", "body:golang"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            item("first", 3),
            item("second", 0),
            // Malformed: no likes_count.
            {
                "title": "broken",
                "created_at": "2022-03-13T10:00:00+09:00",
                "user": {"id": "gone", "name": "Gone"}
            },
            item("third", 12)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).await.search_titles("golang").await.unwrap();
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn search_term_is_percent_encoded() {
    let server = MockServer::start().await;
    // wiremock matches against the decoded value, so this only passes if the
    // client encoded "a&b c" instead of splicing it into the URL raw.
    Mock::given(method("GET"))
        .and(path("/api/v2/items"))
        .and(query_param("query", "body:a&b c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).await.search_titles("a&b c").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn per_page_override_is_clamped_and_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server).await.with_per_page(500);
    api.search_titles("anything").await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.search_titles("rust").await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}

#[tokio::test]
async fn non_array_body_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "not an array"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.search_titles("rust").await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}
