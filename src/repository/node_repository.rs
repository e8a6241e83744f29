//! Server node repository.
//!
//! SQLx data access over the `server_nodes` table. Row id uniqueness is
//! the only integrity constraint the table carries.

use sqlx::{Row, SqlitePool};

use crate::errors::{RepoResult, RepositoryError};
use crate::models::{CreateNodeRequest, ServerNode, UpdateNodeRequest};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS server_nodes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    host TEXT NOT NULL,
    port TEXT NOT NULL DEFAULT '',
    account TEXT NOT NULL,
    password TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 0,
    remark TEXT NOT NULL DEFAULT '',
    create_time TEXT NOT NULL DEFAULT '',
    update_time TEXT NOT NULL DEFAULT ''
)
"#;

#[derive(Clone)]
pub struct NodeRepository {
    pool: SqlitePool,
}

impl NodeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `server_nodes` table when it does not exist yet.
    pub async fn init_schema(&self) -> RepoResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a new node. `create_time` is set server-side.
    pub async fn create(&self, req: &CreateNodeRequest) -> RepoResult<ServerNode> {
        let now = now_string();
        let result = sqlx::query(
            r#"
            INSERT INTO server_nodes (name, host, port, account, password, status, remark, create_time, update_time)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&req.name)
        .bind(&req.host)
        .bind(&req.port)
        .bind(&req.account)
        .bind(&req.password)
        .bind(req.status)
        .bind(&req.remark)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid()).await
    }

    /// Single node by id.
    pub async fn find_by_id(&self, id: i64) -> RepoResult<ServerNode> {
        let row = sqlx::query("SELECT * FROM server_nodes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(map_node(&row))
    }

    /// All nodes. Returns an empty vec rather than an error when the
    /// table is empty.
    pub async fn list_all(&self) -> RepoResult<Vec<ServerNode>> {
        let rows = sqlx::query("SELECT * FROM server_nodes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_node).collect())
    }

    /// Fuzzy name filter. TRIM guards against padded names in old rows.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Vec<ServerNode>> {
        let rows = sqlx::query("SELECT * FROM server_nodes WHERE TRIM(name) LIKE ? ORDER BY id")
            .bind(format!("%{name}%"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_node).collect())
    }

    /// Full update of the mutable columns. `update_time` is set server-side.
    pub async fn update(&self, req: &UpdateNodeRequest) -> RepoResult<ServerNode> {
        let result = sqlx::query(
            r#"
            UPDATE server_nodes
            SET name = ?, host = ?, port = ?,
                account = ?, password = ?,
                status = ?, remark = ?, update_time = ?
            WHERE id = ?
            "#,
        )
        .bind(&req.name)
        .bind(&req.host)
        .bind(&req.port)
        .bind(&req.account)
        .bind(&req.password)
        .bind(req.status)
        .bind(&req.remark)
        .bind(now_string())
        .bind(req.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find_by_id(req.id).await
    }

    /// Delete by id.
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM server_nodes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn map_node(row: &sqlx::sqlite::SqliteRow) -> ServerNode {
    ServerNode {
        id: row.get("id"),
        name: row.get("name"),
        host: row.get("host"),
        port: row.get("port"),
        account: row.get("account"),
        password: row.get("password"),
        status: row.get("status"),
        remark: row.get("remark"),
        create_time: row.get("create_time"),
        update_time: row.get("update_time"),
    }
}

fn now_string() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
