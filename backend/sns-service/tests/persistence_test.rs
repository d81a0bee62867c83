/// Constraint handling and lock ordering below the HTTP layer
mod common;

use error_types::ErrorCode;
use sns_service::db::{comment_repo, like_repo, post_repo, DbError, COMMENTS_PKEY, POSTS_PKEY};
use sns_service::id::MAX_ID_ATTEMPTS;
use sns_service::services::{CommentService, LikeService, PostService};
use sns_service::AppError;

use common::start_postgres;

#[actix_web::test]
async fn duplicate_ids_are_reported_by_primary_key_name() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;

    post_repo::insert_post(&pool, "p_fixed001", "alice", "hi")
        .await
        .unwrap();
    let err = post_repo::insert_post(&pool, "p_fixed001", "bob", "again")
        .await
        .unwrap_err();
    assert!(err.is_unique_violation_of(POSTS_PKEY), "got {:?}", err);

    comment_repo::insert_comment(&pool, "c_fixed001", "p_fixed001", "bob", "one")
        .await
        .unwrap();
    let err = comment_repo::insert_comment(&pool, "c_fixed001", "p_fixed001", "bob", "two")
        .await
        .unwrap_err();
    assert!(err.is_unique_violation_of(COMMENTS_PKEY), "got {:?}", err);
}

#[actix_web::test]
async fn colliding_post_id_is_regenerated() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;
    let service = PostService::new(pool.clone());

    post_repo::insert_post(&pool, "p_taken001", "alice", "hi")
        .await
        .unwrap();

    let mut candidates = vec!["p_fresh001", "p_taken001", "p_taken001"];
    let post = service
        .create_post_with_ids(|| candidates.pop().unwrap().to_string(), "bob", "hello")
        .await
        .unwrap();

    assert_eq!(post.id, "p_fresh001");
    assert!(candidates.is_empty());
}

#[actix_web::test]
async fn exhausted_id_attempts_are_a_server_error() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;

    post_repo::insert_post(&pool, "p_taken001", "alice", "hi")
        .await
        .unwrap();

    let mut calls = 0;
    let err = PostService::new(pool.clone())
        .create_post_with_ids(
            || {
                calls += 1;
                "p_taken001".to_string()
            },
            "bob",
            "hello",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal(_)), "got {:?}", err);
    assert_eq!(err.code(), ErrorCode::ServerError);
    assert_eq!(calls, MAX_ID_ATTEMPTS);

    comment_repo::insert_comment(&pool, "c_taken001", "p_taken001", "bob", "one")
        .await
        .unwrap();

    let mut calls = 0;
    let err = CommentService::new(pool.clone())
        .create_comment_with_ids(
            || {
                calls += 1;
                "c_taken001".to_string()
            },
            "p_taken001",
            "bob",
            "two",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal(_)), "got {:?}", err);
    assert_eq!(calls, MAX_ID_ATTEMPTS);
}

#[actix_web::test]
async fn children_of_a_missing_post_are_not_found() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;

    let err = comment_repo::insert_comment(&pool, "c_orphan01", "p_missing1", "bob", "x")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {:?}", err);

    let err = like_repo::insert_like(&pool, "p_missing1", "bob")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {:?}", err);

    let err = CommentService::new(pool.clone())
        .create_comment("p_missing1", "bob", "x")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.to_response().message, "Post not found");

    let likes = LikeService::new(pool.clone());
    for result in [
        likes.like_post("p_missing1", "bob").await,
        likes.unlike_post("p_missing1", "bob").await,
    ] {
        let err = result.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}

#[actix_web::test]
async fn unlike_racing_post_delete_never_fails_server_side() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;

    let posts = PostService::new(pool.clone());
    let likes = LikeService::new(pool.clone());

    for round in 0..50 {
        let post = posts.create_post("alice", "hi").await.unwrap();
        likes.like_post(&post.id, "bob").await.unwrap();
        likes.like_post(&post.id, "carol").await.unwrap();

        let (unliked, deleted) = futures::join!(
            likes.unlike_post(&post.id, "bob"),
            posts.delete_post(&post.id)
        );

        assert!(deleted.unwrap(), "round {}", round);
        match unliked {
            Ok(post) => assert_eq!(post.likes, 1, "round {}", round),
            Err(err) => assert_eq!(err.code(), ErrorCode::NotFound, "round {}: {:?}", round, err),
        }

        assert_eq!(like_repo::count_likes_by_post(&pool, &post.id).await.unwrap(), 0);
    }
}

#[actix_web::test]
async fn like_racing_post_delete_never_fails_server_side() {
    let (_pg, pg_url) = start_postgres().await;
    let pool = common::build_pool(&pg_url).await;

    let posts = PostService::new(pool.clone());
    let likes = LikeService::new(pool.clone());

    for round in 0..50 {
        let post = posts.create_post("alice", "hi").await.unwrap();
        likes.like_post(&post.id, "carol").await.unwrap();

        let (liked, deleted) = futures::join!(
            likes.like_post(&post.id, "bob"),
            posts.delete_post(&post.id)
        );

        assert!(deleted.unwrap(), "round {}", round);
        match liked {
            Ok(post) => assert_eq!(post.likes, 2, "round {}", round),
            Err(err) => assert_eq!(err.code(), ErrorCode::NotFound, "round {}: {:?}", round, err),
        }

        assert_eq!(like_repo::count_likes_by_post(&pool, &post.id).await.unwrap(), 0);
    }
}
