//! End-to-end tests: GraphQL operations executed against a containerized
//! Postgres database.

use async_graphql::Response;
use blogql_lib::test_utils::TestApi;
use serde_json::Value;

fn data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

async fn create_author(api: &TestApi, first_name: &str, last_name: &str) -> i64 {
    let response = api
        .execute(&format!(
            r#"mutation {{ createAuthor(firstName: "{first_name}", lastName: "{last_name}") {{ id }} }}"#
        ))
        .await;
    data(response)["createAuthor"]["id"].as_i64().unwrap()
}

async fn create_post(api: &TestApi, title: &str, author_id: i64) -> i64 {
    let response = api
        .execute(&format!(
            r#"mutation {{ createPost(title: "{title}", authorId: {author_id}) {{ id }} }}"#
        ))
        .await;
    data(response)["createPost"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_author_round_trip() {
    let api = TestApi::new().await.unwrap();

    let id = create_author(&api, "Ada", "Lovelace").await;

    let response = api
        .execute(&format!(
            "{{ author(id: {id}) {{ id firstName lastName posts {{ id }} }} }}"
        ))
        .await;
    let author = &data(response)["author"];

    assert_eq!(author["id"].as_i64(), Some(id));
    assert_eq!(author["firstName"], "Ada");
    assert_eq!(author["lastName"], "Lovelace");
    // No posts yet: an empty list, not null.
    assert_eq!(author["posts"], Value::Array(vec![]));
}

#[tokio::test]
async fn missing_author_resolves_to_null() {
    let api = TestApi::new().await.unwrap();

    let response = api.execute("{ author(id: 999) { id } }").await;
    assert_eq!(data(response)["author"], Value::Null);
}

#[tokio::test]
async fn nested_relations_resolve_in_both_directions() {
    let api = TestApi::new().await.unwrap();

    let ada = create_author(&api, "Ada", "Lovelace").await;
    let hello = create_post(&api, "Hello", ada).await;
    create_post(&api, "World", ada).await;

    let response = api
        .execute(&format!(
            "{{ post(id: {hello}) {{ title author {{ id firstName }} }} }}"
        ))
        .await;
    let post = &data(response)["post"];
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["author"]["id"].as_i64(), Some(ada));
    assert_eq!(post["author"]["firstName"], "Ada");

    let response = api
        .execute(&format!("{{ author(id: {ada}) {{ posts {{ title votes }} }} }}"))
        .await;
    let posts = data(response)["author"]["posts"].clone();
    assert_eq!(posts.as_array().unwrap().len(), 2);
    assert_eq!(posts[0]["title"], "Hello");
    assert_eq!(posts[1]["title"], "World");
    assert_eq!(posts[0]["votes"], 0);
}

#[tokio::test]
async fn upvotes_accumulate() {
    let api = TestApi::new().await.unwrap();

    let ada = create_author(&api, "Ada", "Lovelace").await;
    let post = create_post(&api, "Hello", ada).await;

    for expected in 1..=2 {
        let response = api
            .execute(&format!("mutation {{ upvotePost(postId: {post}) {{ votes }} }}"))
            .await;
        assert_eq!(data(response)["upvotePost"]["votes"].as_i64(), Some(expected));
    }

    let response = api.execute(&format!("{{ post(id: {post}) {{ votes }} }}")).await;
    assert_eq!(data(response)["post"]["votes"].as_i64(), Some(2));
}

#[tokio::test]
async fn upvoting_a_missing_post_fails_with_not_found() {
    let api = TestApi::new().await.unwrap();

    let response = api
        .execute("mutation { upvotePost(postId: 999) { id } }")
        .await;

    assert_eq!(response.errors.len(), 1);
    let error = serde_json::to_value(&response.errors[0]).unwrap();
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("no post with id 999"));
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");
    assert_eq!(error["extensions"]["id"], 999);
}

#[tokio::test]
async fn deleting_a_missing_post_fails_with_not_found() {
    let api = TestApi::new().await.unwrap();

    let response = api.execute("mutation { deletePost(postId: 999) }").await;

    assert_eq!(response.errors.len(), 1);
    let error = serde_json::to_value(&response.errors[0]).unwrap();
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_post_removes_it() {
    let api = TestApi::new().await.unwrap();

    let ada = create_author(&api, "Ada", "Lovelace").await;
    let post = create_post(&api, "Hello", ada).await;

    let response = api
        .execute(&format!("mutation {{ deletePost(postId: {post}) }}"))
        .await;
    assert_eq!(data(response)["deletePost"], Value::Bool(true));

    let response = api.execute(&format!("{{ post(id: {post}) {{ id }} }}")).await;
    assert_eq!(data(response)["post"], Value::Null);
}

#[tokio::test]
async fn deleting_an_author_orphans_their_posts() {
    let api = TestApi::new().await.unwrap();

    let ada = create_author(&api, "Ada", "Lovelace").await;
    let post = create_post(&api, "Hello", ada).await;

    let response = api
        .execute(&format!("mutation {{ deleteAuthor(authorId: {ada}) }}"))
        .await;
    assert_eq!(data(response)["deleteAuthor"], Value::Bool(true));

    // The post survives, its author resolves to null.
    let response = api
        .execute(&format!("{{ post(id: {post}) {{ title author {{ id }} }} }}"))
        .await;
    let post = &data(response)["post"];
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["author"], Value::Null);

    // Deleting again reports that nothing was removed.
    let response = api
        .execute(&format!("mutation {{ deleteAuthor(authorId: {ada}) }}"))
        .await;
    assert_eq!(data(response)["deleteAuthor"], Value::Bool(false));
}

#[tokio::test]
async fn creating_a_post_for_a_missing_author_fails() {
    let api = TestApi::new().await.unwrap();

    let response = api
        .execute(r#"mutation { createPost(title: "Dangling", authorId: 42) { id } }"#)
        .await;

    assert_eq!(response.errors.len(), 1);
    let error = serde_json::to_value(&response.errors[0]).unwrap();
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");

    let response = api.execute("{ posts { id } }").await;
    assert_eq!(data(response)["posts"], Value::Array(vec![]));
}

#[tokio::test]
async fn update_mutations_change_only_the_given_fields() {
    let api = TestApi::new().await.unwrap();

    let ada = create_author(&api, "Ada", "Byron").await;
    let post = create_post(&api, "Hello", ada).await;

    let response = api
        .execute(&format!(
            r#"mutation {{ updateAuthor(authorId: {ada}, lastName: "Lovelace") {{ firstName lastName }} }}"#
        ))
        .await;
    let author = &data(response)["updateAuthor"];
    assert_eq!(author["firstName"], "Ada");
    assert_eq!(author["lastName"], "Lovelace");

    let response = api
        .execute(&format!(
            r#"mutation {{ updatePost(postId: {post}, title: "Hello, world") {{ title votes }} }}"#
        ))
        .await;
    let updated = &data(response)["updatePost"];
    assert_eq!(updated["title"], "Hello, world");
    assert_eq!(updated["votes"], 0);
}

#[tokio::test]
async fn update_with_no_fields_is_a_validation_error() {
    let api = TestApi::new().await.unwrap();

    let ada = create_author(&api, "Ada", "Lovelace").await;

    let response = api
        .execute(&format!(
            "mutation {{ updateAuthor(authorId: {ada}) {{ id }} }}"
        ))
        .await;

    assert_eq!(response.errors.len(), 1);
    let error = serde_json::to_value(&response.errors[0]).unwrap();
    assert_eq!(error["extensions"]["code"], "VALIDATION");
}

#[tokio::test]
async fn posts_can_be_filtered_by_author() {
    let api = TestApi::new().await.unwrap();

    let ada = create_author(&api, "Ada", "Lovelace").await;
    let tom = create_author(&api, "Tom", "Coleman").await;
    create_post(&api, "Introduction to GraphQL", ada).await;
    create_post(&api, "Welcome to Apollo", tom).await;

    let response = api
        .execute(&format!("{{ posts(authorId: {ada}) {{ title }} }}"))
        .await;
    let posts = data(response)["posts"].clone();
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["title"], "Introduction to GraphQL");
}
