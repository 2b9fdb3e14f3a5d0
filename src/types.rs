//! Wire types for the Scribe blog API.
//!
//! Shapes mirror the server's JSON exactly: camelCase field names,
//! SCREAMING_SNAKE enum values. Posts are server-owned; the client only
//! ever holds read copies plus the create/update payloads below.

use serde::{Deserialize, Serialize};

/// Post visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    Public,
    Private,
}

/// Post lifecycle state. The server only permits deletion of `Inactive` posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Active,
    Inactive,
}

/// A blog post as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub status: PostStatus,
    pub author_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Registered user, as returned by sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// The authenticated identity from `GET /auth/me`: the user plus the
/// issued-at/expiry claims the server echoes from the bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Me {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Request body for `POST /auth/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/signin`.
#[derive(Debug, Clone, Serialize)]
pub struct SignInPayload {
    pub email: String,
    pub password: String,
}

/// Response body from `POST /auth/signin`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
}

/// Request body for `POST /posts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostPayload {
    pub title: String,
    pub content: String,
    pub author_id: i64,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub status: PostStatus,
}

/// Request body for `PUT /posts/{id}`. Every field is optional; `None`
/// fields are omitted from the JSON so the server leaves them untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}
