use crate::config::Config;
use crate::model::Submission;
use crate::validate::NewSubmission;
use anyhow::Result;
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database as LibsqlDatabase, Row};

const SYSTEM_MIGRATIONS: &[(&str, &str)] =
    &[("system/000_migrations_table.sql", include_str!("migrations/system/000_migrations_table.sql"))];

const MIGRATIONS: &[(&str, &str)] = &[("001_submissions.sql", include_str!("migrations/001_submissions.sql"))];

pub struct Database {
    _db: LibsqlDatabase,
    conn: Connection,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn is_remote(url: &str) -> bool {
        url.starts_with("libsql://") || url.starts_with("http://") || url.starts_with("https://")
    }

    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let query = "SELECT 1 FROM _migrations WHERE name = ?";
        match conn.query(query, libsql::params![name]).await {
            Ok(mut rows) => Ok(rows.next().await?.is_some()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(false)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        conn.execute(query, libsql::params![name]).await?;
        Ok(())
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }

    /// Opens the store (remote for libsql/http URIs, local file otherwise),
    /// verifies the connection, and runs pending migrations. Any failure
    /// here is fatal to the caller; there is no retry.
    pub async fn new(cfg: &Config) -> Result<Self> {
        let url = cfg.get_database_url();

        let db = if Self::is_remote(url) {
            tracing::info!("[db] connecting to remote database");
            let token = cfg.get_auth_token().unwrap_or_default().to_string();
            Builder::new_remote(url.to_string(), token).build().await?
        } else {
            Builder::new_local(url).build().await?
        };

        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        for (filename, sql) in SYSTEM_MIGRATIONS {
            Self::run_migration(&conn, filename, sql).await?;
        }

        for (filename, sql) in MIGRATIONS {
            Self::run_migration(&conn, filename, sql).await?;
        }

        Ok(Database { _db: db, conn })
    }

    fn parse_timestamp(raw: String) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse timestamp {raw}: {e}"))?
            .with_timezone(&Utc))
    }

    fn row_to_submission(row: &Row) -> Result<Submission> {
        Ok(Submission {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            message: row.get(3)?,
            created_at: Self::parse_timestamp(row.get(4)?)?,
            updated_at: Self::parse_timestamp(row.get(5)?)?,
        })
    }

    /// Inserts a validated submission and returns the stored document with
    /// its assigned id and timestamps.
    pub async fn insert_submission(&self, new: &NewSubmission) -> Result<Submission> {
        let query = r#"
            INSERT INTO submissions (name, email, message, created_at, updated_at)
            VALUES (?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            RETURNING id, name, email, message, created_at, updated_at
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![new.name.as_str(), new.email.as_str(), new.message.as_str()])
            .await?;

        if let Some(row) = rows.next().await? {
            Self::row_to_submission(&row)
        } else {
            anyhow::bail!("insert returned no row")
        }
    }

    /// Fetches every stored submission, newest first.
    pub async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let query = r#"
            SELECT id, name, email, message, created_at, updated_at
            FROM submissions
            ORDER BY created_at DESC, id DESC
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut submissions: Vec<Submission> = vec![];

        while let Some(row) = rows.next().await? {
            submissions.push(Self::row_to_submission(&row)?);
        }

        Ok(submissions)
    }
}
