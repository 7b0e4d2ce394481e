use sqlx::SqlitePool;

pub async fn install(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS threads ( \
            id TEXT NOT NULL PRIMARY KEY, \
            user_id TEXT NOT NULL, \
            user_name TEXT NOT NULL, \
            is_open BOOLEAN NOT NULL DEFAULT TRUE \
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS messages ( \
            id TEXT NOT NULL PRIMARY KEY, \
            thread_id TEXT NOT NULL, \
            kind TEXT NOT NULL, \
            body TEXT NOT NULL, \
            name TEXT \
        )",
    )
    .execute(db_pool)
    .await?;

    Ok(())
}
