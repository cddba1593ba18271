//! # PostService
//!
//! Creation and listing of feed posts.

use std::sync::Arc;

use domains::{
    CallerIdentity, DomainError, NewPost, PageRequest, Paginated, PaginationMeta, Post,
    PostRepository, PostSummary, Result, UserRepository,
};

use crate::validation;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Persists a new post authored by `author`.
    ///
    /// The author always comes from the resolved caller identity, never from
    /// request input. Content is validated before the store is touched.
    #[tracing::instrument(skip(self, content, author), fields(author_id = %author.user_id))]
    pub async fn create(&self, content: &str, author: &CallerIdentity) -> Result<Post> {
        validation::post_content(content)?;

        // The token may outlive its user.
        if self.users.find_by_id(author.user_id).await?.is_none() {
            tracing::warn!("post rejected: author no longer exists");
            return Err(DomainError::not_found("User", author.user_id));
        }

        let post = self
            .posts
            .create(NewPost {
                content: content.to_string(),
                user_id: author.user_id,
            })
            .await?;

        tracing::info!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// One page of the feed, newest first, with author projections.
    ///
    /// The page fetch and the count are separate reads, so under concurrent
    /// writes `meta` may briefly disagree with `data`.
    #[tracing::instrument(skip(self), fields(page = request.page(), limit = request.limit()))]
    pub async fn list(&self, request: PageRequest) -> Result<Paginated<PostSummary>> {
        let data = self.posts.list_with_authors(request.window()).await?;
        let total = self.posts.count().await?;

        Ok(Paginated {
            data,
            meta: PaginationMeta::new(total, request),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domains::{
        AuthorSummary, MockPostRepository, MockUserRepository, PageWindow, PostId, User, UserId,
    };
    use mockall::predicate::eq;

    fn caller() -> CallerIdentity {
        CallerIdentity {
            user_id: UserId::new(),
            username: "ferris".into(),
        }
    }

    fn user_for(identity: &CallerIdentity) -> User {
        User {
            id: identity.user_id,
            username: identity.username.clone(),
            email: "ferris@example.com".into(),
            created_at: Utc::now(),
        }
    }

    fn summaries(count: usize) -> Vec<PostSummary> {
        let author = AuthorSummary {
            id: UserId::new(),
            username: "ferris".into(),
            email: "ferris@example.com".into(),
        };
        let now = Utc::now();
        (0..count)
            .map(|i| PostSummary {
                id: PostId::new(),
                content: format!("post {i}"),
                created_at: now - Duration::seconds(i as i64),
                author: author.clone(),
            })
            .collect()
    }

    #[tokio::test]
    async fn create_attaches_caller_as_author() {
        let identity = caller();
        let user = user_for(&identity);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(identity.user_id))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut posts = MockPostRepository::new();
        let author_id = identity.user_id;
        posts
            .expect_create()
            .withf(move |new| new.user_id == author_id && new.content == "Hello Rust!")
            .times(1)
            .returning(|new| {
                Ok(Post {
                    id: PostId::new(),
                    content: new.content,
                    user_id: new.user_id,
                    created_at: Utc::now(),
                })
            });

        let service = PostService::new(Arc::new(posts), Arc::new(users));
        let before = Utc::now();
        let post = service.create("Hello Rust!", &identity).await.unwrap();

        assert_eq!(post.content, "Hello Rust!");
        assert_eq!(post.user_id, identity.user_id);
        assert!(post.created_at >= before);
    }

    #[tokio::test]
    async fn create_rejects_blank_content_without_touching_store() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();
        let mut posts = MockPostRepository::new();
        posts.expect_create().never();

        let service = PostService::new(Arc::new(posts), Arc::new(users));
        let err = service.create("   ", &caller()).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_fails_when_author_vanished() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut posts = MockPostRepository::new();
        posts.expect_create().never();

        let service = PostService::new(Arc::new(posts), Arc::new(users));
        let err = service.create("orphan", &caller()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(resource, _) if resource == "User"));
    }

    #[tokio::test]
    async fn create_propagates_store_errors() {
        let identity = caller();
        let user = user_for(&identity);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        let mut posts = MockPostRepository::new();
        posts
            .expect_create()
            .returning(|_| Err(DomainError::Storage("disk full".into())));

        let service = PostService::new(Arc::new(posts), Arc::new(users));
        let err = service.create("hello", &identity).await.unwrap_err();

        assert_eq!(err, DomainError::Storage("disk full".into()));
    }

    #[tokio::test]
    async fn list_on_empty_store() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_list_with_authors()
            .with(eq(PageWindow { offset: 0, limit: 10 }))
            .returning(|_| Ok(Vec::new()));
        posts.expect_count().returning(|| Ok(0));

        let service = PostService::new(Arc::new(posts), Arc::new(MockUserRepository::new()));
        let page = service.list(PageRequest::default()).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(
            page.meta,
            PaginationMeta {
                total: 0,
                page: 1,
                limit: 10,
                total_pages: 0,
                has_next_page: false,
                has_previous_page: false,
            }
        );
    }

    #[tokio::test]
    async fn list_third_page_of_twenty_five() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_list_with_authors()
            .with(eq(PageWindow { offset: 20, limit: 10 }))
            .times(1)
            .returning(|_| Ok(summaries(5)));
        posts.expect_count().returning(|| Ok(25));

        let service = PostService::new(Arc::new(posts), Arc::new(MockUserRepository::new()));
        let request = PageRequest::new(Some(3), Some(10)).unwrap();
        let page = service.list(request).await.unwrap();

        assert_eq!(page.data.len(), 5);
        assert_eq!(page.meta.total, 25);
        assert_eq!(page.meta.total_pages, 3);
        assert!(!page.meta.has_next_page);
        assert!(page.meta.has_previous_page);
    }

    #[tokio::test]
    async fn list_propagates_count_failure() {
        let mut posts = MockPostRepository::new();
        posts.expect_list_with_authors().returning(|_| Ok(summaries(1)));
        posts
            .expect_count()
            .returning(|| Err(DomainError::Storage("connection reset".into())));

        let service = PostService::new(Arc::new(posts), Arc::new(MockUserRepository::new()));
        let err = service.list(PageRequest::default()).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
    }
}
