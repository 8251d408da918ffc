use guessr_db::StorePool;

#[tokio::main]
async fn main() {
    let Ok(db_url) = std::env::var("GUESSR_DB_URL") else {
        eprintln!("GUESSR_DB_URL must be set");
        std::process::exit(1);
    };
    let pool = match StorePool::connect(&db_url, 1).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("failed to connect to database: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = pool.migrate().await {
        eprintln!("failed to run migrations: {err}");
        std::process::exit(1);
    }
    pool.close().await;
}
