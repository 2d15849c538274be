mod db;
mod redis;

pub use db::{connect_to_mongo, database_name};
pub use redis::{RedisService, connect_to_redis};
