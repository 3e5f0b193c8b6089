use super::IUserRepo;
use bookli_domain::{User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    timezone: String,
    api_key: String,
}

impl Into<User> for UserRaw {
    fn into(self) -> User {
        User {
            id: self.user_uid.into(),
            // Timezones are validated before they are stored
            timezone: self.timezone.parse().unwrap_or(chrono_tz::UTC),
            api_key: self.api_key,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, timezone, api_key)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(user.timezone.to_string())
        .bind(&user.api_key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let user: UserRaw = match sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => user,
            Err(_) => return None,
        };
        Some(user.into())
    }

    async fn find_by_api_key(&self, api_key: &str) -> Option<User> {
        let user: UserRaw = match sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            WHERE u.api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => user,
            Err(_) => return None,
        };
        Some(user.into())
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        match sqlx::query_as(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => {
                let user: UserRaw = user;
                Some(user.into())
            }
            Err(_) => None,
        }
    }
}
