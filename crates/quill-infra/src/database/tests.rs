use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
use quill_core::domain::Post;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
use sea_orm::{DatabaseBackend, MockDatabase};

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();
    let author_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            author_id,
            title: "Test Post".to_owned(),
            summary: "Summary".to_owned(),
            content: "Content".to_owned(),
            cover: Some("uploads/cover.jpg".to_owned()),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(std::sync::Arc::new(db));

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.id, post_id);
    assert_eq!(found.author_id, author_id);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            username: "alice".to_owned(),
            password_hash: "$argon2id$...".to_owned(),
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(std::sync::Arc::new(db));

    let found = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, user_id);
    assert_eq!(found.username, "alice");
}

#[tokio::test]
async fn test_find_recent_maps_models() {
    let author_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post::Model {
                id: uuid::Uuid::new_v4(),
                author_id,
                title: "Second".to_owned(),
                summary: String::new(),
                content: String::new(),
                cover: None,
                created_at: now.into(),
                updated_at: now.into(),
            },
            post::Model {
                id: uuid::Uuid::new_v4(),
                author_id,
                title: "First".to_owned(),
                summary: String::new(),
                content: String::new(),
                cover: None,
                created_at: (now - chrono::TimeDelta::hours(1)).into(),
                updated_at: (now - chrono::TimeDelta::hours(1)).into(),
            },
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(std::sync::Arc::new(db));

    let posts = repo.find_recent(20).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Second");
}
