/// HTTP tests for like/unlike and the cascading post delete
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use futures::future::join_all;
use serde_json::json;
use sns_service::db::{comment_repo, like_repo};
use sns_service::models::Post;
use sns_service::services::LikeService;

use common::{
    create_comment, create_post, like_request, send, setup_test_app, start_postgres,
    unlike_request,
};

#[actix_web::test]
async fn like_is_idempotent_per_username() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let app = setup_test_app(pool.clone()).await;

    let post = create_post(&app, "alice", "hi").await;

    let (status, body) = send(&app, like_request(&post.id, "bob")).await;
    assert_eq!(status, StatusCode::OK);
    let liked: Post = serde_json::from_value(body).unwrap();
    assert_eq!(liked.likes, 1);

    let (status, body) = send(&app, like_request(&post.id, "bob")).await;
    assert_eq!(status, StatusCode::OK);
    let again: Post = serde_json::from_value(body).unwrap();
    assert_eq!(again.likes, 1);

    let (_, body) = send(&app, like_request(&post.id, "carol")).await;
    let two: Post = serde_json::from_value(body).unwrap();
    assert_eq!(two.likes, 2);

    let rows = like_repo::count_likes_by_post(&pool, &post.id).await.unwrap();
    assert_eq!(rows, 2);
}

#[actix_web::test]
async fn unlike_without_like_is_a_no_op() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let app = setup_test_app(pool.clone()).await;

    let post = create_post(&app, "alice", "hi").await;

    let (status, body) = send(&app, unlike_request(&post.id, "bob")).await;
    assert_eq!(status, StatusCode::OK);
    let unchanged: Post = serde_json::from_value(body).unwrap();
    assert_eq!(unchanged, post);

    send(&app, like_request(&post.id, "bob")).await;

    let (_, body) = send(&app, unlike_request(&post.id, "bob")).await;
    assert_eq!(serde_json::from_value::<Post>(body).unwrap().likes, 0);

    let (_, body) = send(&app, unlike_request(&post.id, "bob")).await;
    assert_eq!(serde_json::from_value::<Post>(body).unwrap().likes, 0);

    assert_eq!(like_repo::count_likes_by_post(&pool, &post.id).await.unwrap(), 0);
}

#[actix_web::test]
async fn counter_matches_like_rows_after_mixed_operations() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let app = setup_test_app(pool.clone()).await;

    let post = create_post(&app, "alice", "hi").await;

    let operations = [
        ("like", "bob"),
        ("like", "carol"),
        ("like", "bob"),
        ("unlike", "dave"),
        ("unlike", "carol"),
        ("like", "erin"),
        ("unlike", "bob"),
        ("like", "bob"),
    ];

    let mut likes = post.likes;
    for (operation, username) in operations {
        let req = match operation {
            "like" => like_request(&post.id, username),
            _ => unlike_request(&post.id, username),
        };
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        likes = serde_json::from_value::<Post>(body).unwrap().likes;

        let rows = like_repo::count_likes_by_post(&pool, &post.id).await.unwrap();
        assert_eq!(i64::from(likes), rows, "after {} {}", operation, username);
    }

    // bob and erin
    assert_eq!(likes, 2);
}

#[actix_web::test]
async fn concurrent_likes_from_one_user_count_once() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let app = setup_test_app(pool.clone()).await;

    let post = create_post(&app, "alice", "hi").await;

    let service = LikeService::new(pool.clone());
    let results = join_all((0..8).map(|_| service.like_post(&post.id, "bob"))).await;

    for result in results {
        let returned = result.expect("duplicate like is not an error");
        assert_eq!(returned.likes, 1);
    }

    assert_eq!(like_repo::count_likes_by_post(&pool, &post.id).await.unwrap(), 1);

    let (_, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/posts/{}", post.id)),
    )
    .await;
    assert_eq!(serde_json::from_value::<Post>(body).unwrap().likes, 1);
}

#[actix_web::test]
async fn like_validation_and_missing_post() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let app = setup_test_app(pool).await;

    let post = create_post(&app, "alice", "hi").await;

    for req in [
        like_request(&post.id, ""),
        unlike_request(&post.id, ""),
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/likes", post.id))
            .set_json(json!({})),
    ] {
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "Invalid input for required field 'username'.");
    }

    for req in [
        like_request("p_missing1", "bob"),
        unlike_request("p_missing1", "bob"),
        like_request("p_missing1", ""),
    ] {
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Post not found");
    }
}

#[actix_web::test]
async fn deleting_a_post_removes_its_comments_and_likes() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let app = setup_test_app(pool.clone()).await;

    let post = create_post(&app, "alice", "hi").await;
    let keep = create_post(&app, "carol", "stays").await;

    let comment = create_comment(&app, &post.id, "bob", "one").await;
    create_comment(&app, &post.id, "dave", "two").await;
    create_comment(&app, &keep.id, "dave", "kept").await;
    send(&app, like_request(&post.id, "bob")).await;
    send(&app, like_request(&post.id, "dave")).await;
    send(&app, like_request(&keep.id, "bob")).await;

    let (status, _) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/posts/{}", post.id)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for uri in [
        format!("/api/posts/{}", post.id),
        format!("/api/posts/{}/comments", post.id),
        format!("/api/posts/{}/comments/{}", post.id, comment.id),
    ] {
        let (status, _) = send(&app, test::TestRequest::get().uri(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
    }

    assert_eq!(like_repo::count_likes_by_post(&pool, &post.id).await.unwrap(), 0);
    assert!(comment_repo::list_comments_by_post(&pool, &post.id)
        .await
        .unwrap()
        .is_empty());

    // Unrelated post is untouched
    let (_, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/posts/{}", keep.id)),
    )
    .await;
    assert_eq!(serde_json::from_value::<Post>(body).unwrap().likes, 1);
    assert_eq!(
        comment_repo::list_comments_by_post(&pool, &keep.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[actix_web::test]
async fn like_metrics_are_exposed() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let app = setup_test_app(pool).await;

    let post = create_post(&app, "alice", "hi").await;
    send(&app, like_request(&post.id, "bob")).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("sns_like_operations_total"));
}
