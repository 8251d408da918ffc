//! Repositories over the `donations`, `banned_words` and `settings` tables.
//!
//! The SQL is shared by both backends (`$N` placeholders are understood by
//! Postgres and SQLite alike), so each backend module is stamped out from
//! one macro body.

macro_rules! query {
    ($db:ty, $sql:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut q = sqlx_core::query::query::<$db>($sql);
        $(q = q.bind($arg);)*
        q
    }};
}

macro_rules! backend_repos {
    ($db:ty, $pool:ty) => {
        use chrono::Utc;
        use sqlx_core::row::Row;

        pub struct DonationRepo<'a> {
            pool: &'a $pool,
        }

        impl<'a> DonationRepo<'a> {
            pub fn new(pool: &'a $pool) -> Self {
                Self { pool }
            }

            /// Sum in cents; zero for users with no rows.
            pub async fn sum_for_user(&self, user_id: i64) -> Result<i64, sqlx_core::Error> {
                let row = query!(
                    $db,
                    r#"
                    SELECT CAST(COALESCE(SUM(amount_cents), 0) AS BIGINT) AS total
                    FROM donations
                    WHERE user_id = $1
                    "#,
                    user_id
                )
                .fetch_one(self.pool)
                .await?;
                row.try_get::<i64, _>("total")
            }

            pub async fn record(
                &self,
                user_id: i64,
                amount_cents: i64,
            ) -> Result<i64, sqlx_core::Error> {
                let row = query!(
                    $db,
                    r#"
                    INSERT INTO donations (user_id, amount_cents, created_at)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                    user_id,
                    amount_cents,
                    Utc::now()
                )
                .fetch_one(self.pool)
                .await?;
                row.try_get::<i64, _>("id")
            }
        }

        pub struct BannedWordRepo<'a> {
            pool: &'a $pool,
        }

        impl<'a> BannedWordRepo<'a> {
            pub fn new(pool: &'a $pool) -> Self {
                Self { pool }
            }

            pub async fn list(&self) -> Result<Vec<String>, sqlx_core::Error> {
                let rows = query!(
                    $db,
                    r#"
                    SELECT word
                    FROM banned_words
                    ORDER BY id ASC
                    "#
                )
                .fetch_all(self.pool)
                .await?;
                rows.iter()
                    .map(|row| row.try_get::<String, _>("word"))
                    .collect()
            }

            /// Returns false when the word was already present.
            pub async fn insert(&self, word: &str) -> Result<bool, sqlx_core::Error> {
                query!(
                    $db,
                    r#"
                    INSERT INTO banned_words (word, created_at)
                    VALUES ($1, $2)
                    ON CONFLICT (word) DO NOTHING
                    "#,
                    word,
                    Utc::now()
                )
                .execute(self.pool)
                .await
                .map(|result| result.rows_affected() > 0)
            }

            pub async fn delete(&self, word: &str) -> Result<bool, sqlx_core::Error> {
                query!(
                    $db,
                    r#"
                    DELETE FROM banned_words
                    WHERE word = $1
                    "#,
                    word
                )
                .execute(self.pool)
                .await
                .map(|result| result.rows_affected() > 0)
            }
        }

        pub struct SettingsRepo<'a> {
            pool: &'a $pool,
        }

        impl<'a> SettingsRepo<'a> {
            pub fn new(pool: &'a $pool) -> Self {
                Self { pool }
            }

            pub async fn get_value(&self, key: &str) -> Result<Option<String>, sqlx_core::Error> {
                let row = query!(
                    $db,
                    r#"
                    SELECT value
                    FROM settings
                    WHERE key = $1
                    "#,
                    key
                )
                .fetch_optional(self.pool)
                .await?;
                match row {
                    Some(row) => Ok(Some(row.try_get::<String, _>("value")?)),
                    None => Ok(None),
                }
            }

            pub async fn set_value(&self, key: &str, value: &str) -> Result<(), sqlx_core::Error> {
                query!(
                    $db,
                    r#"
                    INSERT INTO settings (key, value)
                    VALUES ($1, $2)
                    ON CONFLICT (key) DO UPDATE SET value = excluded.value
                    "#,
                    key,
                    value
                )
                .execute(self.pool)
                .await
                .map(|_| ())
            }
        }
    };
}

#[cfg(feature = "postgres")]
pub mod pg {
    backend_repos!(sqlx_postgres::Postgres, crate::PgPool);
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    backend_repos!(sqlx_sqlite::Sqlite, crate::SqlitePool);
}
