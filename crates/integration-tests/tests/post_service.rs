use std::sync::Arc;

use domains::{CommentId, DomainError, PostId, PostRepository, Reaction, UserId};
use integration_tests::services;

#[tokio::test]
async fn two_users_liking_are_both_kept() {
    let s = services();
    let alex = s.user("Alex").await;
    let bob = s.user("Bob").await;
    let post = s.post_by(alex).await;

    s.posts.toggle_like(post, Some(alex)).await.unwrap();
    let updated = s.posts.toggle_like(post, Some(bob)).await.unwrap();

    assert_eq!(updated.likes().len(), 2);
    assert!(updated.likes().contains(&alex));
    assert!(updated.likes().contains(&bob));
}

#[tokio::test]
async fn like_then_dislike_moves_the_user() {
    let s = services();
    let alex = s.user("Alex").await;
    let post = s.post_by(alex).await;

    s.posts.toggle_like(post, Some(alex)).await.unwrap();
    let updated = s.posts.toggle_dislike(post, Some(alex)).await.unwrap();

    assert_eq!(updated.reaction_of(alex), Reaction::Disliked);
    assert!(updated.likes().is_empty());

    let updated = s.posts.toggle_dislike(post, Some(alex)).await.unwrap();
    assert_eq!(updated.reaction_of(alex), Reaction::Neutral);
}

#[tokio::test]
async fn reacting_to_a_missing_post_is_not_found() {
    let s = services();
    let alex = s.user("Alex").await;

    let err = s
        .posts
        .toggle_like(PostId::new(), Some(alex))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Post", .. }));
}

#[tokio::test]
async fn unregistered_ids_cannot_react() {
    let s = services();
    let alex = s.user("Alex").await;
    let post = s.post_by(alex).await;

    let err = s
        .posts
        .toggle_like(post, Some(UserId::new()))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Unauthenticated);
    assert!(s.posts.get_post(post).await.unwrap().likes().is_empty());
}

#[tokio::test]
async fn comments_keep_order_and_ownership() {
    let s = services();
    let alex = s.user("Alex").await;
    let bob = s.user("Bob").await;
    let post = s.post_by(alex).await;

    s.posts.add_comment(post, Some(alex), Some("first")).await.unwrap();
    let updated = s
        .posts
        .add_comment(post, Some(bob), Some("  second  "))
        .await
        .unwrap();
    let texts: Vec<_> = updated.comments().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["first", "second"]);

    let alex_comment = updated.comments()[0].id;
    let before = updated.comments().to_vec();

    let err = s
        .posts
        .delete_comment(post, Some(bob), alex_comment)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    assert_eq!(s.posts.get_post(post).await.unwrap().comments(), before.as_slice());

    let updated = s
        .posts
        .delete_comment(post, Some(alex), alex_comment)
        .await
        .unwrap();
    assert_eq!(updated.comments().len(), 1);
    assert_eq!(updated.comments()[0].text, "second");

    let err = s
        .posts
        .delete_comment(post, Some(alex), CommentId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Comment", .. }));
}

#[tokio::test]
async fn only_the_author_deletes_a_post_and_comments_go_with_it() {
    let s = services();
    let alex = s.user("Alex").await;
    let bob = s.user("Bob").await;
    let post = s.post_by(alex).await;
    s.posts.add_comment(post, Some(bob), Some("hi")).await.unwrap();

    let err = s.posts.delete_post(post, Some(bob)).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    assert!(s.posts.get_post(post).await.is_ok());

    s.posts.delete_post(post, Some(alex)).await.unwrap();
    assert!(PostRepository::find_by_id(s.store.as_ref(), post)
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        s.posts.delete_post(post, Some(alex)).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn comments_on_a_missing_post_are_not_found() {
    let s = services();
    let alex = s.user("Alex").await;
    let missing = PostId::new();

    let err = s
        .posts
        .add_comment(missing, Some(alex), Some("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Post", .. }));

    let err = s
        .posts
        .delete_comment(missing, Some(alex), CommentId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Post", .. }));
}

#[tokio::test]
async fn anonymous_or_unknown_callers_cannot_delete() {
    let s = services();
    let alex = s.user("Alex").await;
    let post = s.post_by(alex).await;
    let updated = s.posts.add_comment(post, Some(alex), Some("mine")).await.unwrap();
    let comment = updated.comments()[0].id;

    for caller in [None, Some(UserId::new())] {
        let err = s.posts.delete_comment(post, caller, comment).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        let err = s.posts.delete_post(post, caller).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
    assert_eq!(s.posts.get_post(post).await.unwrap().comments().len(), 1);

    let err = s
        .posts
        .delete_post(PostId::new(), Some(UserId::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Post", .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_likes_from_many_users_are_all_recorded() {
    let s = Arc::new(services());
    let author = s.user("Author").await;
    let post = s.post_by(author).await;

    let mut users = Vec::new();
    for i in 0..16 {
        users.push(s.user(&format!("User{i}")).await);
    }

    let tasks: Vec<_> = users
        .iter()
        .map(|&user| {
            let s = Arc::clone(&s);
            tokio::spawn(async move { s.posts.toggle_like(post, Some(user)).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = s.posts.get_post(post).await.unwrap();
    assert_eq!(stored.likes().len(), users.len());
    assert!(stored.dislikes().is_empty());
}
