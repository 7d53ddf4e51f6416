//! Crea (o reactiva) la cuenta de administrador
//!
//! El registro público solo admite chauffeurs; este binario es la única
//! vía para dar de alta un admin. Es idempotente.

use anyhow::{Context, Result};
use chrono::Utc;
use dotenvy::dotenv;
use tracing::info;
use uuid::Uuid;

use fleet_backoffice::{config::DatabaseConfig, database::DatabaseConnection, models::UserRole};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let email = std::env::var("ADMIN_EMAIL")
        .context("ADMIN_EMAIL must be set")?
        .trim()
        .to_lowercase();
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
    let full_name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrateur".to_string());
    let phone = std::env::var("ADMIN_PHONE").unwrap_or_else(|_| "0000000000".to_string());

    if password.len() < 6 {
        anyhow::bail!("ADMIN_PASSWORD must be at least 6 characters");
    }

    let db = DatabaseConnection::new(&DatabaseConfig::from_env()?).await?;
    db.run_migrations().await?;

    let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
    let now = Utc::now();

    let (id, inserted): (Uuid, bool) = sqlx::query_as(
        r#"
        INSERT INTO users (id, full_name, email, password_hash, role, phone, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $7)
        ON CONFLICT (email) DO UPDATE
            SET role = EXCLUDED.role,
                is_active = TRUE,
                password_hash = EXCLUDED.password_hash,
                updated_at = EXCLUDED.updated_at
        RETURNING id, (xmax = 0) AS inserted
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&full_name)
    .bind(&email)
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .bind(&phone)
    .bind(now)
    .fetch_one(db.pool())
    .await?;

    if inserted {
        info!("✅ Administrador {} creado ({})", email, id);
    } else {
        info!("🔁 Administrador {} actualizado ({})", email, id);
    }

    Ok(())
}
