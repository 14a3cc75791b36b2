use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{NewUser, User};

/// Trait for account and session operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn list_users(&self) -> Result<Vec<User>>;
    fn current_user(&self) -> Result<Option<User>>;
    async fn register(&self, new_user: NewUser) -> Result<User>;
    async fn login(&self, email: &str, password: &str) -> Result<User>;
    async fn logout(&self) -> Result<()>;
    async fn switch_user(&self, user_id: &str) -> Result<User>;
}
