use super::IBookingRepo;
use bookli_domain::{Booking, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookingRaw {
    booking_uid: Uuid,
    user_uid: Uuid,
    start_ts: i64,
    end_ts: i64,
    created: i64,
    updated: i64,
}

impl Into<Booking> for BookingRaw {
    fn into(self) -> Booking {
        Booking {
            id: self.booking_uid.into(),
            user_id: self.user_uid.into(),
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for PostgresBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings(booking_uid, user_uid, start_ts, end_ts, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(booking.user_id.inner_ref())
        .bind(booking.start_ts)
        .bind(booking.end_ts)
        .bind(booking.created)
        .bind(booking.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE bookings SET
                user_uid = $2,
                start_ts = $3,
                end_ts = $4,
                created = $5,
                updated = $6
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(booking.user_id.inner_ref())
        .bind(booking.start_ts)
        .bind(booking.end_ts)
        .bind(booking.created)
        .bind(booking.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        let booking: BookingRaw = match sqlx::query_as(
            r#"
            SELECT * FROM bookings AS b
            WHERE b.booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(booking) => booking,
            Err(_) => return None,
        };
        Some(booking.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Booking> {
        let bookings: Vec<BookingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM bookings AS b
            WHERE b.user_uid = $1
            ORDER BY b.start_ts
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        bookings.into_iter().map(|booking| booking.into()).collect()
    }

    async fn delete(&self, booking_id: &ID) -> Option<Booking> {
        match sqlx::query_as(
            r#"
            DELETE FROM bookings AS b
            WHERE b.booking_uid = $1
            RETURNING *
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(booking) => {
                let booking: BookingRaw = booking;
                Some(booking.into())
            }
            Err(_) => None,
        }
    }
}
