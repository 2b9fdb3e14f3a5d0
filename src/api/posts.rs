//! Post operations: lists, point lookup, search, and mutations.
//!
//! Reads consult the cache first and populate it on a miss. Every
//! successful mutation stales the whole `posts` prefix; an update
//! additionally writes the server-confirmed post through to its point
//! key. Create only invalidates, with no point write-through; the new
//! post becomes visible through the refetch the invalidation forces
//! (see DESIGN.md for the asymmetry).

use reqwest::Method;

use super::BlogClient;
use crate::cache::CacheKey;
use crate::error::ApiError;
use crate::types::{CreatePostPayload, Post, UpdatePostPayload};

fn require_post_id(id: i64) -> Result<(), ApiError> {
    if id <= 0 {
        return Err(ApiError::Validation("a valid post id is required".to_string()));
    }
    Ok(())
}

impl BlogClient {
    /// List posts visible to anonymous readers. `GET /posts`.
    pub async fn list_active_posts(&self) -> Result<Vec<Post>, ApiError> {
        if let Some(posts) = self.cache.read(&CacheKey::ActivePosts) {
            return Ok(posts);
        }

        let posts: Vec<Post> = self.http.get_json("/posts").await?;
        self.cache.write(&CacheKey::ActivePosts, &posts);
        Ok(posts)
    }

    /// List every post, active or not. `GET /posts/all`, bearer auth.
    pub async fn list_all_posts(&self) -> Result<Vec<Post>, ApiError> {
        if let Some(posts) = self.cache.read(&CacheKey::AllPosts) {
            return Ok(posts);
        }

        let posts: Vec<Post> = self.http.get_json("/posts/all").await?;
        self.cache.write(&CacheKey::AllPosts, &posts);
        Ok(posts)
    }

    /// Fetch a single post. `GET /posts/{id}`.
    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        require_post_id(id)?;

        if let Some(post) = self.cache.read(&CacheKey::Post(id)) {
            return Ok(post);
        }

        let post: Post = self.http.get_json(&format!("/posts/{id}")).await?;
        self.cache.write(&CacheKey::Post(id), &post);
        Ok(post)
    }

    /// Search posts by title. `GET /posts/search?title=`.
    ///
    /// Never issued with an empty term: that is a local validation
    /// failure with no network call.
    pub async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ApiError> {
        if term.trim().is_empty() {
            return Err(ApiError::Validation(
                "search term must not be empty".to_string(),
            ));
        }

        if let Some(posts) = self.cache.read(&CacheKey::Search(term)) {
            return Ok(posts);
        }

        let builder = self
            .http
            .request(Method::GET, "/posts/search")
            .query(&[("title", term)]);
        let response = self.http.execute(builder).await?;
        let posts: Vec<Post> = response.json().await?;

        self.cache.write(&CacheKey::Search(term), &posts);
        Ok(posts)
    }

    /// Create a post. `POST /posts`, bearer auth.
    ///
    /// Success stales every `posts`-prefixed cache entry so the next
    /// list or search refetches.
    pub async fn create_post(&self, payload: &CreatePostPayload) -> Result<Post, ApiError> {
        if payload.title.trim().is_empty() {
            return Err(ApiError::Validation("title is required".to_string()));
        }
        if payload.content.trim().is_empty() {
            return Err(ApiError::Validation("content is required".to_string()));
        }

        let post: Post = self.http.post_json("/posts", payload).await?;
        self.cache.invalidate_prefix(CacheKey::POSTS_PREFIX);
        tracing::debug!(id = post.id, "post created");
        Ok(post)
    }

    /// Partially update a post. `PUT /posts/{id}`, bearer auth.
    ///
    /// Success stales the `posts` prefix and then writes the
    /// server-confirmed post through to `posts:<id>`, so an open detail
    /// view reads the new value with no refetch.
    pub async fn update_post(
        &self,
        id: i64,
        payload: &UpdatePostPayload,
    ) -> Result<Post, ApiError> {
        require_post_id(id)?;

        let post: Post = self.http.put_json(&format!("/posts/{id}"), payload).await?;
        self.cache.invalidate_prefix(CacheKey::POSTS_PREFIX);
        self.cache.write(&CacheKey::Post(post.id), &post);
        tracing::debug!(id = post.id, "post updated");
        Ok(post)
    }

    /// Delete a post. `DELETE /posts/{id}`, bearer auth, 204 on
    /// success. The server only permits this for `INACTIVE` posts.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        require_post_id(id)?;

        self.http.delete(&format!("/posts/{id}")).await?;
        self.cache.invalidate_prefix(CacheKey::POSTS_PREFIX);
        tracing::debug!(id, "post deleted");
        Ok(())
    }
}
