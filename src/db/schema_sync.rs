//! Schema synchronization for the SQLite store
//!
//! - Creates missing tables
//! - Adds missing nullable columns to existing tables
//! - Does NOT handle column renames or type changes (requires DB wipe)

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// A column in a catalog table
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    /// Column definition after the name, e.g. `TEXT NOT NULL`
    pub definition: &'static str,
    /// Whether the column may be added to an existing table with ALTER TABLE
    pub addable: bool,
}

/// A catalog table definition
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.definition))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }
}

/// Movies keep insertion order through the `seq` rowid alias
pub const MOVIES_TABLE: TableDef = TableDef {
    name: "movies",
    columns: &[
        ColumnDef { name: "seq", definition: "INTEGER PRIMARY KEY AUTOINCREMENT", addable: false },
        ColumnDef { name: "id", definition: "TEXT NOT NULL UNIQUE", addable: false },
        ColumnDef { name: "title", definition: "TEXT", addable: true },
        ColumnDef { name: "release_date", definition: "INTEGER", addable: true },
        ColumnDef { name: "rating", definition: "INTEGER", addable: true },
        ColumnDef { name: "status", definition: "TEXT", addable: true },
        ColumnDef { name: "actor_ids", definition: "TEXT NOT NULL DEFAULT '[]'", addable: true },
    ],
};

/// Actors keep seed order through the `position` rowid alias
pub const ACTORS_TABLE: TableDef = TableDef {
    name: "actors",
    columns: &[
        ColumnDef { name: "position", definition: "INTEGER PRIMARY KEY AUTOINCREMENT", addable: false },
        ColumnDef { name: "id", definition: "TEXT NOT NULL UNIQUE", addable: false },
        ColumnDef { name: "name", definition: "TEXT NOT NULL DEFAULT ''", addable: true },
    ],
};

pub const CATALOG_TABLES: &[TableDef] = &[MOVIES_TABLE, ACTORS_TABLE];

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
    pub columns_added: Vec<(String, String)>, // (table, column)
    pub errors: Vec<String>,
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Get existing columns for a table
async fn get_table_columns(
    pool: &SqlitePool,
    table_name: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(i32, String, String, i32, Option<String>, i32)> =
        sqlx::query_as(&format!("PRAGMA table_info({})", table_name))
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(_, name, _, _, _, _)| name).collect())
}

/// Sync a single table to the database
pub async fn sync_table(pool: &SqlitePool, table: &TableDef) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();

    if !table_exists(pool, table.name).await? {
        let create_sql = table.create_table_sql();
        debug!("Creating table {}: {}", table.name, create_sql);
        sqlx::query(&create_sql).execute(pool).await?;
        result.tables_created.push(table.name.to_string());
        return Ok(result);
    }

    let existing = get_table_columns(pool, table.name).await?;
    for column in table.columns {
        if existing.iter().any(|c| c == column.name) {
            continue;
        }
        if !column.addable {
            let msg = format!(
                "Table {} is missing column {} which cannot be added in place",
                table.name, column.name
            );
            warn!("{}", msg);
            result.errors.push(msg);
            continue;
        }

        let alter_sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            table.name, column.name, column.definition
        );
        debug!("Adding column: {}", alter_sql);
        match sqlx::query(&alter_sql).execute(pool).await {
            Ok(_) => result
                .columns_added
                .push((table.name.to_string(), column.name.to_string())),
            Err(e) => {
                let msg = format!("Failed to add {}.{}: {}", table.name, column.name, e);
                warn!("{}", msg);
                result.errors.push(msg);
            }
        }
    }

    Ok(result)
}

/// Sync every catalog table
pub async fn sync_catalog_schema(pool: &SqlitePool) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut total = SchemaSyncResult::default();

    for table in CATALOG_TABLES {
        let result = sync_table(pool, table).await?;
        total.tables_created.extend(result.tables_created);
        total.columns_added.extend(result.columns_added);
        total.errors.extend(result.errors);
    }

    info!(
        tables_created = total.tables_created.len(),
        columns_added = total.columns_added.len(),
        errors = total.errors.len(),
        "Schema sync complete"
    );

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[test]
    fn test_create_table_sql() {
        let sql = ACTORS_TABLE.create_table_sql();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS actors (position INTEGER PRIMARY KEY AUTOINCREMENT, \
             id TEXT NOT NULL UNIQUE, name TEXT NOT NULL DEFAULT '')"
        );
    }

    #[tokio::test]
    async fn test_sync_creates_tables_once() {
        let pool = memory_pool().await;

        let first = sync_catalog_schema(&pool).await.unwrap();
        assert_eq!(first.tables_created, vec!["movies", "actors"]);

        let second = sync_catalog_schema(&pool).await.unwrap();
        assert!(second.tables_created.is_empty());
        assert!(second.columns_added.is_empty());
    }

    #[tokio::test]
    async fn test_sync_adds_missing_columns() {
        let pool = memory_pool().await;
        sqlx::query(
            "CREATE TABLE movies (seq INTEGER PRIMARY KEY AUTOINCREMENT, id TEXT NOT NULL UNIQUE, title TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = sync_table(&pool, &MOVIES_TABLE).await.unwrap();
        let added: Vec<&str> = result.columns_added.iter().map(|(_, c)| c.as_str()).collect();
        assert_eq!(added, vec!["release_date", "rating", "status", "actor_ids"]);
        assert!(result.errors.is_empty());
    }
}
