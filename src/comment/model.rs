use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub post_id: ObjectId,
    pub author_id: ObjectId,
    pub parent_id: Option<ObjectId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: String,
    pub content: String,
    pub parent_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// Full author details, exposed only on the top level of a thread entry.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AuthorView {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Slim author reference used inside `parent` and `replies`; deliberately
/// typed without an email field.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AuthorRef {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ParentView {
    pub id: String,
    pub content: String,
    pub author: AuthorRef,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReplyView {
    pub id: String,
    pub content: String,
    pub author: AuthorRef,
}

/// One entry of a post's comment thread. Every comment of the post appears
/// as an entry; replies additionally show up nested under their parent.
#[derive(Debug, Serialize, Clone)]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorView,
    pub parent: Option<ParentView>,
    pub replies: Vec<ReplyView>,
}
