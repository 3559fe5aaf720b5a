// src/database.rs
use crate::errors::Result;
use serde::Serialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Row, SqlitePool,
};
use std::path::PathBuf;
use std::str::FromStr;

/// Opens the pool and applies the embedded migrations.
pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    let in_memory = database_url.contains(":memory:");

    if !in_memory {
        let db_path = db_path(database_url);
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
            log::info!("Database directory ready: {}", parent.display());
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // An in-memory database lives as long as its single connection.
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;
    log::info!("Database connected: {}", database_url);

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database migrations completed");

    Ok(pool)
}

fn db_path(database_url: &str) -> PathBuf {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);
    PathBuf::from(path)
}

/// A subscriber about to be stored together with the premium quoted to them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscriber {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub age: i64,
    pub anciennete_permis: i64,
    pub puissance: i64,
    pub prime: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Subscriber {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub age: Option<i64>,
    pub anciennete_permis: Option<i64>,
    pub puissance: Option<i64>,
    pub prime: Option<f64>,
    pub created_at: String,
}

/// Inserts the subscriber and returns its id. Fails on an already known email.
pub async fn save_subscriber(pool: &SqlitePool, subscriber: &NewSubscriber) -> Result<i64> {
    let created_at = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO utilisateur (nom, prenom, email, age, anciennete_permis, puissance, prime, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#
    )
    .bind(&subscriber.nom)
    .bind(&subscriber.prenom)
    .bind(&subscriber.email)
    .bind(subscriber.age)
    .bind(subscriber.anciennete_permis)
    .bind(subscriber.puissance)
    .bind(subscriber.prime)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn find_subscriber_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Subscriber>> {
    let row = sqlx::query(
        r#"
        SELECT id, nom, prenom, email, age, anciennete_permis, puissance, prime, created_at
        FROM utilisateur
        WHERE email = ?
        "#
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Subscriber {
        id: row.get(0),
        nom: row.get(1),
        prenom: row.get(2),
        email: row.get(3),
        age: row.get(4),
        anciennete_permis: row.get(5),
        puissance: row.get(6),
        prime: row.get(7),
        created_at: row.get(8),
    }))
}
