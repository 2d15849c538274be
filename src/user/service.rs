use crate::database::{RedisService, database_name};
use crate::middleware::auth::{create_token, create_token_with_session};
use crate::user::model::User;
use crate::utils::error::CustomError;
use crate::utils::model::LoginRequest;
use crate::utils::{hashing, validation};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};

pub struct UserService {
    collection: Collection<User>,
}

impl UserService {
    pub fn new(client: &Client) -> Self {
        let collection = client.database(&database_name()).collection::<User>("users");
        UserService { collection }
    }

    pub async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<ObjectId, CustomError> {
        validation::validate_username(&username)?;
        validation::validate_email(&email)?;
        validation::validate_password(&password)?;

        if self.email_exists(&email).await.map_err(|_| {
            CustomError::InternalServerError("Failed to check email existence".to_string())
        })? {
            return Err(CustomError::ConflictError(
                "Email already exists".to_string(),
            ));
        }

        if self.username_exists(&username).await.map_err(|_| {
            CustomError::InternalServerError("Failed to check username existence".to_string())
        })? {
            return Err(CustomError::ConflictError(
                "Username already exists".to_string(),
            ));
        }

        let hashed_password = hashing::hash_password(&password)
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        let new_user = User {
            id: None,
            username,
            email,
            password: hashed_password,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let result = self
            .collection
            .insert_one(new_user)
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            CustomError::InternalServerError("Failed to get inserted user ID".to_string())
        })
    }

    async fn email_exists(&self, email: &str) -> Result<bool, mongodb::error::Error> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count > 0)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, mongodb::error::Error> {
        let count = self
            .collection
            .count_documents(doc! { "username": username })
            .await?;
        Ok(count > 0)
    }

    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, CustomError> {
        // Uniform message for unknown user and wrong password
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|_| CustomError::InternalServerError("Database error".to_string()))?
            .ok_or_else(|| CustomError::UnauthorizedError("Invalid credentials".to_string()))?;

        if !hashing::verify_password(password, &user.password)
            .map_err(|_| CustomError::InternalServerError("Password check failed".to_string()))?
        {
            return Err(CustomError::UnauthorizedError(
                "Invalid credentials".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn login(
        &self,
        login_data: LoginRequest,
        redis_service: Option<&RedisService>,
    ) -> Result<String, CustomError> {
        let user = self
            .authenticate_user(&login_data.username, &login_data.password)
            .await?;

        let user_id = user
            .id
            .as_ref()
            .ok_or_else(|| CustomError::InternalServerError("User ID missing".to_string()))?;

        // Token gets a Redis-backed session when the store is available
        let token = if let Some(redis) = redis_service {
            create_token_with_session(&user_id.to_hex(), redis).await?
        } else {
            create_token(&user_id.to_hex()).await?
        };

        Ok(token)
    }
}
