use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    // Ensure required tables exist (minimal schema bootstrap)

    // a001_agent
    let check_agent_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a001_agent';
    "#;
    let agent_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_agent_table.to_string(),
        ))
        .await?;

    if agent_table_exists.is_empty() {
        tracing::info!("Creating a001_agent table");
        let create_agent_table_sql = r#"
            CREATE TABLE a001_agent (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                team_size INTEGER NOT NULL DEFAULT 0,
                total_earnings INTEGER NOT NULL DEFAULT 0,
                wallet_balance INTEGER NOT NULL DEFAULT 0,
                commission_rate INTEGER NOT NULL DEFAULT 10,
                status TEXT NOT NULL DEFAULT 'active',
                joined_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_agent_table_sql.to_string(),
        ))
        .await?;
    }

    // a002_user
    let check_user_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a002_user';
    "#;
    let user_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_user_table.to_string(),
        ))
        .await?;

    if user_table_exists.is_empty() {
        tracing::info!("Creating a002_user table");
        let create_user_table_sql = r#"
            CREATE TABLE a002_user (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                avatar TEXT NOT NULL DEFAULT '',
                phone TEXT NOT NULL DEFAULT '',
                kind TEXT NOT NULL DEFAULT 'independent',
                agent_id TEXT,
                total_minutes INTEGER NOT NULL DEFAULT 0,
                total_earned INTEGER NOT NULL DEFAULT 0,
                rating REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'pending',
                audio_intro_url TEXT,
                joined_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_user_table_sql.to_string(),
        ))
        .await?;
    } else {
        // audio_intro_url arrived with the audio review workflow; add it
        // to databases created before that
        let pragma = format!("PRAGMA table_info('{}');", "a002_user");
        let cols = conn
            .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
            .await?;
        let mut has_audio_intro_url = false;
        for row in cols {
            let name: String = row.try_get("", "name").unwrap_or_default();
            if name == "audio_intro_url" {
                has_audio_intro_url = true;
            }
        }
        if !has_audio_intro_url {
            tracing::info!("Adding audio_intro_url column to a002_user");
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "ALTER TABLE a002_user ADD COLUMN audio_intro_url TEXT;".to_string(),
            ))
            .await?;
        }
    }

    // a002_commission_split
    // One row per assignment; the current split for a user is the row
    // with superseded_at IS NULL
    let check_split_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a002_commission_split';
    "#;
    let split_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_split_table.to_string(),
        ))
        .await?;

    if split_table_exists.is_empty() {
        tracing::info!("Creating a002_commission_split table");
        let create_split_table_sql = r#"
            CREATE TABLE a002_commission_split (
                id TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NOT NULL,
                client_rate INTEGER NOT NULL,
                admin_share INTEGER NOT NULL,
                agent_share INTEGER NOT NULL DEFAULT 0,
                user_share INTEGER NOT NULL,
                set_by TEXT NOT NULL DEFAULT '',
                set_at TEXT NOT NULL,
                superseded_at TEXT
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_split_table_sql.to_string(),
        ))
        .await?;
    }

    // a003_client
    let check_client_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a003_client';
    "#;
    let client_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_client_table.to_string(),
        ))
        .await?;

    if client_table_exists.is_empty() {
        tracing::info!("Creating a003_client table");
        let create_client_table_sql = r#"
            CREATE TABLE a003_client (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                coin_balance INTEGER NOT NULL DEFAULT 0,
                total_spent INTEGER NOT NULL DEFAULT 0,
                recharge_count INTEGER NOT NULL DEFAULT 0,
                last_active TEXT NOT NULL,
                joined_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_client_table_sql.to_string(),
        ))
        .await?;
    }

    // a004_chat_session
    // Amounts are captured at settlement time; messages holds the chat
    // transcript as a JSON array, '[]' for calls
    let check_session_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a004_chat_session';
    "#;
    let session_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_session_table.to_string(),
        ))
        .await?;

    if session_table_exists.is_empty() {
        tracing::info!("Creating a004_chat_session table");
        let create_session_table_sql = r#"
            CREATE TABLE a004_chat_session (
                id TEXT PRIMARY KEY NOT NULL,
                kind TEXT NOT NULL,
                user_id TEXT NOT NULL,
                client_id TEXT NOT NULL,
                agent_id TEXT,
                started_at TEXT NOT NULL,
                minutes INTEGER NOT NULL DEFAULT 0,
                client_spent INTEGER NOT NULL DEFAULT 0,
                admin_earned INTEGER NOT NULL DEFAULT 0,
                agent_earned INTEGER NOT NULL DEFAULT 0,
                user_earned INTEGER NOT NULL DEFAULT 0,
                messages TEXT NOT NULL DEFAULT '[]'
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_session_table_sql.to_string(),
        ))
        .await?;
    }

    // a005_recharge
    let check_recharge_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a005_recharge';
    "#;
    let recharge_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_recharge_table.to_string(),
        ))
        .await?;

    if recharge_table_exists.is_empty() {
        tracing::info!("Creating a005_recharge table");
        let create_recharge_table_sql = r#"
            CREATE TABLE a005_recharge (
                id TEXT PRIMARY KEY NOT NULL,
                client_id TEXT NOT NULL,
                amount INTEGER NOT NULL,
                method TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'success',
                recharged_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_recharge_table_sql.to_string(),
        ))
        .await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Points the global connection at a throwaway sqlite file. Tests share
/// one database per process, so a second caller just reuses the first
/// one's connection.
#[cfg(test)]
pub async fn ensure_test_database() -> anyhow::Result<()> {
    if DB_CONN.get().is_some() {
        return Ok(());
    }
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("test.db");
    let path_str = path.to_string_lossy().to_string();
    // The file must outlive the call; tests never clean it up
    std::mem::forget(dir);
    match initialize_database(Some(&path_str)).await {
        Ok(()) => Ok(()),
        // Lost the race to another test that initialized first
        Err(_) if DB_CONN.get().is_some() => Ok(()),
        Err(e) => Err(e),
    }
}
