use crate::database::database_name;
use crate::post::post_model::Post;
use crate::utils::error::CustomError;
use chrono::Utc;
use mongodb::{
    Client, Collection,
    bson::{doc, oid::ObjectId},
};

pub struct PostService {
    collection: Collection<Post>,
}

impl PostService {
    pub fn new(client: &Client) -> Self {
        let collection = client.database(&database_name()).collection::<Post>("posts");
        PostService { collection }
    }

    pub async fn create_post(&self, post: Post) -> Result<Post, CustomError> {
        self.collection
            .insert_one(&post)
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to create post: {}", e)))?;

        Ok(post)
    }

    pub async fn get_post(&self, id: &ObjectId) -> Result<Option<Post>, CustomError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to fetch post: {}", e)))
    }

    /// Cheap existence probe used before fetching a post's comments
    pub async fn post_exists(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let count = self
            .collection
            .count_documents(doc! { "_id": id })
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to check post: {}", e)))?;

        Ok(count > 0)
    }

    pub async fn delete_post(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to delete post: {}", e)))?;

        Ok(result.deleted_count > 0)
    }

    pub async fn update_post(
        &self,
        id: &ObjectId,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Option<Post>, CustomError> {
        let mut set_doc = doc! {
            "updated_at": Utc::now().to_rfc3339()
        };

        if let Some(t) = title {
            set_doc.insert("title", t);
        }
        if let Some(c) = content {
            set_doc.insert("content", c);
        }

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_doc })
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to update post: {}", e)))
    }
}
