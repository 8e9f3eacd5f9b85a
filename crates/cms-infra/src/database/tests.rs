use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use serde_json::json;
use uuid::Uuid;

use cms_core::domain::{ContactFilter, PageRequest, Post, ServicePage};
use cms_core::error::RepoError;
use cms_core::ports::{BaseRepository, ContactRepository, ServiceRepository};

use crate::database::entity::{contact, post, service_page};
use crate::database::postgres_repo::{
    PostgresContactRepository, PostgresPostRepository, PostgresServiceRepository,
};

fn post_model(id: Uuid) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        category: "SEO".to_owned(),
        excerpt: "Short".to_owned(),
        content: "Long".to_owned(),
        tags: json!(["rust", "seo"]),
        featured: true,
        cover: "https://img.example/cover.png".to_owned(),
        author: "Admin".to_owned(),
        read_time: "5 min".to_owned(),
        views: "0".to_owned(),
        date: "1/2/2025".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn contact_model(name: &str) -> contact::Model {
    let now = Utc::now();
    contact::Model {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        email: "jane@example.com".to_owned(),
        phone: String::new(),
        message: "Hello there, call me".to_owned(),
        ip: "10.0.0.1".to_owned(),
        user_agent: "test".to_owned(),
        spam_score: 0,
        handled: false,
        note: None,
        source: "contact-form".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn find_post_decodes_json_tags() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.category, "SEO");
    assert_eq!(post.tags, vec!["rust", "seo"]);
}

#[tokio::test]
async fn insert_returns_the_stored_row() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = post_model(post_id).into();
    let saved = repo.insert(post).await.unwrap();

    assert_eq!(saved.id, post_id);
    assert!(saved.featured);
}

#[tokio::test]
async fn update_of_vanished_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = post_model(Uuid::new_v4()).into();

    assert!(matches!(repo.update(post).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn delete_reports_rows_affected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresServiceRepository::new(db);

    assert!(repo.delete_by_slug("seo").await.unwrap());
    assert!(!repo.delete_by_slug("seo").await.unwrap());
}

#[tokio::test]
async fn count_reads_the_aggregate() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(4)]])
        .into_connection();

    let repo = PostgresServiceRepository::new(db);

    assert_eq!(
        BaseRepository::<ServicePage, Uuid>::count(&repo).await.unwrap(),
        4
    );
}

#[tokio::test]
async fn service_detail_round_trips_through_jsonb() {
    let now = Utc::now();
    let model = service_page::Model {
        id: Uuid::new_v4(),
        slug: "seo".to_owned(),
        title: "SEO".to_owned(),
        text: "Rank".to_owned(),
        image: None,
        icon: Some("search".to_owned()),
        detail: Some(json!({ "summary": "Organic", "faqs": [{ "q": "Q", "a": "A" }] })),
        created_at: now.into(),
        updated_at: now.into(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresServiceRepository::new(db);
    let page = repo.find_by_slug("seo").await.unwrap().unwrap();

    let detail = page.detail.unwrap();
    assert_eq!(detail.summary.as_deref(), Some("Organic"));
    assert_eq!(detail.faqs.unwrap()[0].a, "A");
}

#[tokio::test]
async fn contact_search_counts_then_fetches_the_window() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(42)]])
        .append_query_results([vec![contact_model("Jane"), contact_model("Joe")]])
        .into_connection();

    let repo = PostgresContactRepository::new(db);
    let page = repo
        .search(
            &ContactFilter::new(Some(false), Some("j%")),
            PageRequest::new(Some(3), Some(10)),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 42);
    assert_eq!(page.pages(), 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Jane");
}

#[tokio::test]
async fn query_failures_are_classified() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("relation does not exist".to_owned())])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        BaseRepository::<Post, Uuid>::find_by_id(&repo, Uuid::new_v4()).await,
        Err(RepoError::Query(_))
    ));
}
