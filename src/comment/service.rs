use crate::comment::model::{
    AuthorRef, AuthorView, Comment, CommentView, ParentView, ReplyView,
};
use crate::database::database_name;
use crate::user::model::User;
use crate::utils::error::CustomError;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use std::collections::HashMap;

pub struct CommentService {
    collection: Collection<Comment>,
    users: Collection<User>,
}

impl CommentService {
    pub fn new(client: &Client) -> Self {
        let db = client.database(&database_name());
        let collection = db.collection::<Comment>("comments");
        let users = db.collection::<User>("users");
        CommentService { collection, users }
    }

    /// Add a new comment to a post, optionally as a reply
    pub async fn add_comment(
        &self,
        post_id: ObjectId,
        author_id: ObjectId,
        parent_id: Option<ObjectId>,
        content: String,
    ) -> Result<ObjectId, CustomError> {
        // Replies must target an existing top-level comment of the same post
        if let Some(pid) = &parent_id {
            let parent = self
                .get_comment_by_id(pid)
                .await?
                .ok_or_else(|| CustomError::NotFoundError("Parent comment not found".to_string()))?;

            if parent.post_id != post_id {
                return Err(CustomError::BadRequestError(
                    "Parent comment belongs to a different post".to_string(),
                ));
            }
            if parent.parent_id.is_some() {
                return Err(CustomError::BadRequestError(
                    "Replies can only be nested one level deep".to_string(),
                ));
            }
        }

        let comment = Comment {
            id: None,
            post_id,
            author_id,
            parent_id,
            content,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let result = self.collection.insert_one(comment).await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to add comment: {}", e))
        })?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            CustomError::InternalServerError("Failed to get inserted comment ID".to_string())
        })
    }

    /// Fetch the full comment thread of a post, newest first, with authors
    /// resolved and parent/replies attached to each entry
    pub async fn get_thread_for_post(
        &self,
        post_id: &ObjectId,
    ) -> Result<Vec<CommentView>, CustomError> {
        let cursor = self
            .collection
            .find(doc! { "post_id": post_id })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to fetch comments: {}", e))
            })?;

        let comments: Vec<Comment> = cursor.try_collect().await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to collect comments: {}", e))
        })?;

        let mut author_ids: Vec<ObjectId> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort();
        author_ids.dedup();

        let users = self.fetch_users(author_ids).await?;

        Ok(build_comment_views(comments, &users))
    }

    async fn fetch_users(
        &self,
        ids: Vec<ObjectId>,
    ) -> Result<HashMap<ObjectId, User>, CustomError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cursor = self
            .users
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to fetch authors: {}", e))
            })?;

        let users: Vec<User> = cursor.try_collect().await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to collect authors: {}", e))
        })?;

        Ok(users
            .into_iter()
            .filter_map(|u| u.id.map(|id| (id, u)))
            .collect())
    }

    /// Get a single comment by ID
    pub async fn get_comment_by_id(
        &self,
        comment_id: &ObjectId,
    ) -> Result<Option<Comment>, CustomError> {
        self.collection
            .find_one(doc! { "_id": comment_id })
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to fetch comment: {}", e))
            })
    }

    /// Update a comment (only the author can update)
    pub async fn update_comment(
        &self,
        comment_id: &ObjectId,
        author_id: &ObjectId,
        content: String,
    ) -> Result<bool, CustomError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": comment_id, "author_id": author_id },
                doc! {
                    "$set": {
                        "content": content,
                        "updated_at": Utc::now().to_rfc3339()
                    }
                },
            )
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to update comment: {}", e))
            })?;

        if result.matched_count == 0 {
            return Err(CustomError::NotFoundError(
                "Comment not found or not authorized".to_string(),
            ));
        }

        Ok(result.modified_count > 0)
    }

    /// Delete a comment (only the author can delete)
    pub async fn delete_comment(
        &self,
        comment_id: &ObjectId,
        author_id: &ObjectId,
    ) -> Result<bool, CustomError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": comment_id, "author_id": author_id })
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to delete comment: {}", e))
            })?;

        if result.deleted_count == 0 {
            return Err(CustomError::NotFoundError(
                "Comment not found or not authorized".to_string(),
            ));
        }

        Ok(true)
    }

    /// Get comment count for a post
    pub async fn get_comment_count(&self, post_id: &ObjectId) -> Result<u64, CustomError> {
        self.collection
            .count_documents(doc! { "post_id": post_id })
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to count comments: {}", e))
            })
    }
}

fn author_view(id: &ObjectId, users: &HashMap<ObjectId, User>) -> AuthorView {
    match users.get(id) {
        Some(user) => AuthorView {
            id: id.to_hex(),
            username: user.username.clone(),
            email: user.email.clone(),
        },
        // Author record gone (e.g. deleted account)
        None => AuthorView {
            id: id.to_hex(),
            username: "unknown".to_string(),
            email: String::new(),
        },
    }
}

fn author_ref(id: &ObjectId, users: &HashMap<ObjectId, User>) -> AuthorRef {
    AuthorRef {
        id: id.to_hex(),
        username: users
            .get(id)
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Shape raw comments into thread views: entries sorted newest-first, each
/// carrying its resolved author, an optional parent summary and its direct
/// replies (oldest-first). Replies nest one level; nothing deeper is built.
pub fn build_comment_views(
    mut comments: Vec<Comment>,
    users: &HashMap<ObjectId, User>,
) -> Vec<CommentView> {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let by_id: HashMap<ObjectId, &Comment> = comments
        .iter()
        .filter_map(|c| c.id.map(|id| (id, c)))
        .collect();

    let mut children: HashMap<ObjectId, Vec<&Comment>> = HashMap::new();
    for comment in &comments {
        if let Some(parent_id) = comment.parent_id {
            children.entry(parent_id).or_default().push(comment);
        }
    }

    comments
        .iter()
        .filter_map(|comment| {
            let id = comment.id?;

            let parent = comment.parent_id.and_then(|pid| {
                by_id.get(&pid).map(|p| ParentView {
                    id: pid.to_hex(),
                    content: p.content.clone(),
                    author: author_ref(&p.author_id, users),
                })
            });

            let mut replies: Vec<&Comment> =
                children.get(&id).map(|v| v.clone()).unwrap_or_default();
            replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            let replies = replies
                .into_iter()
                .filter_map(|r| {
                    Some(ReplyView {
                        id: r.id?.to_hex(),
                        content: r.content.clone(),
                        author: author_ref(&r.author_id, users),
                    })
                })
                .collect();

            Some(CommentView {
                id: id.to_hex(),
                content: comment.content.clone(),
                created_at: comment.created_at,
                author: author_view(&comment.author_id, users),
                parent,
                replies,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user(id: ObjectId, username: &str, email: &str) -> User {
        User {
            id: Some(id),
            username: username.to_string(),
            email: email.to_string(),
            password: "hashed".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn comment(
        id: ObjectId,
        post_id: ObjectId,
        author_id: ObjectId,
        parent_id: Option<ObjectId>,
        content: &str,
        age_minutes: i64,
    ) -> Comment {
        let at = Utc::now() - Duration::minutes(age_minutes);
        Comment {
            id: Some(id),
            post_id,
            author_id,
            parent_id,
            content: content.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn entries_are_ordered_newest_first_with_reply_nested_under_parent() {
        let post = ObjectId::new();
        let alice = ObjectId::new();
        let bob = ObjectId::new();
        let c1 = ObjectId::new();
        let c2 = ObjectId::new();

        let comments = vec![
            comment(c1, post, alice, None, "first!", 10),
            comment(c2, post, bob, Some(c1), "replying to first", 5),
        ];
        let users = HashMap::from([
            (alice, user(alice, "alice", "alice@example.com")),
            (bob, user(bob, "bob", "bob@example.com")),
        ]);

        let views = build_comment_views(comments, &users);

        // Newest (the reply) comes first; both comments appear top-level
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, c2.to_hex());
        assert_eq!(views[1].id, c1.to_hex());

        // The reply knows its parent
        let parent = views[0].parent.as_ref().unwrap();
        assert_eq!(parent.id, c1.to_hex());
        assert_eq!(parent.content, "first!");
        assert_eq!(parent.author.username, "alice");

        // The parent lists the reply
        assert_eq!(views[1].replies.len(), 1);
        assert_eq!(views[1].replies[0].id, c2.to_hex());
        assert_eq!(views[1].replies[0].author.username, "bob");
        assert!(views[1].parent.is_none());
    }

    #[test]
    fn replies_are_ordered_oldest_first() {
        let post = ObjectId::new();
        let alice = ObjectId::new();
        let root = ObjectId::new();
        let r1 = ObjectId::new();
        let r2 = ObjectId::new();

        let comments = vec![
            comment(root, post, alice, None, "root", 30),
            comment(r2, post, alice, Some(root), "second reply", 10),
            comment(r1, post, alice, Some(root), "first reply", 20),
        ];
        let users = HashMap::from([(alice, user(alice, "alice", "alice@example.com"))]);

        let views = build_comment_views(comments, &users);
        let root_view = views.iter().find(|v| v.id == root.to_hex()).unwrap();
        let reply_ids: Vec<&str> = root_view.replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(reply_ids, vec![r1.to_hex(), r2.to_hex()]);
    }

    #[test]
    fn email_only_appears_on_top_level_author() {
        let post = ObjectId::new();
        let alice = ObjectId::new();
        let bob = ObjectId::new();
        let c1 = ObjectId::new();
        let c2 = ObjectId::new();

        let comments = vec![
            comment(c1, post, alice, None, "top", 10),
            comment(c2, post, bob, Some(c1), "reply", 5),
        ];
        let users = HashMap::from([
            (alice, user(alice, "alice", "alice@example.com")),
            (bob, user(bob, "bob", "bob@example.com")),
        ]);

        let views = build_comment_views(comments, &users);
        let json = serde_json::to_value(&views).unwrap();

        for entry in json.as_array().unwrap() {
            assert!(entry["author"]["email"].is_string());
            if let Some(parent) = entry.get("parent").filter(|p| !p.is_null()) {
                assert!(parent["author"].get("email").is_none());
            }
            for reply in entry["replies"].as_array().unwrap() {
                assert!(reply["author"].get("email").is_none());
            }
        }
    }

    #[test]
    fn missing_parent_and_missing_author_are_tolerated() {
        let post = ObjectId::new();
        let ghost_author = ObjectId::new();
        let orphan = ObjectId::new();

        // Parent was deleted; author record is gone too
        let comments = vec![comment(
            orphan,
            post,
            ghost_author,
            Some(ObjectId::new()),
            "orphaned reply",
            1,
        )];
        let users = HashMap::new();

        let views = build_comment_views(comments, &users);
        assert_eq!(views.len(), 1);
        assert!(views[0].parent.is_none());
        assert_eq!(views[0].author.username, "unknown");
    }

    #[test]
    fn empty_thread_yields_empty_list() {
        let views = build_comment_views(Vec::new(), &HashMap::new());
        assert!(views.is_empty());
    }
}
