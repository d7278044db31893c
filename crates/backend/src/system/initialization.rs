use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// Create the operator tables on first start. Statements run one at a
/// time; sea-orm's SQLite driver takes no batches.
pub async fn ensure_auth_tables() -> Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT,
            created_by TEXT
        )",
        "CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        )",
        "CREATE INDEX IF NOT EXISTS idx_sys_refresh_tokens_hash
            ON sys_refresh_tokens (token_hash)",
        "CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    ];

    let conn = get_connection();
    for ddl in statements {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await
        .context("Failed to apply auth schema")?;
    }

    tracing::info!("Auth tables ready");
    Ok(())
}

/// Create the default admin account when no operators exist yet.
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    let count = repository::count_users().await?;
    if count > 0 {
        return Ok(());
    }

    tracing::info!("No operator accounts found. Creating default admin user...");

    let admin_dto = CreateUserDto {
        username: "admin".to_string(),
        password: "admin".to_string(),
        email: None,
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    };

    let admin_id = service::create(admin_dto, None).await?;

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Default admin user created!");
    tracing::warn!("  Username: admin");
    tracing::warn!("  Password: admin");
    tracing::warn!("  User ID: {}", admin_id);
    tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
    tracing::warn!("═══════════════════════════════════════════════");

    Ok(())
}
