mod inmemory;
mod postgres;

use bookli_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_api_key(&self, api_key: &str) -> Option<User>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
}
