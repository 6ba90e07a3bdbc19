//! DuckDB sink
//!
//! Same table layout as PostgreSQL, kept in a local DuckDB file. DuckDB
//! accepts `VARCHAR(n)` but does not enforce the length, so the bounds are
//! spelled out as CHECK constraints.

use super::{column_list, to_rows, Row, Sink, NAME_MAX_LEN, TABLE_COLUMNS, TYPE_MAX_LEN};
use crate::error::{Error, Result};
use crate::record::Transaction;
use async_trait::async_trait;
use duckdb::{params, Connection};
use std::path::{Path, PathBuf};

/// In-memory database marker
const MEMORY: &str = ":memory:";

/// Sink writing into a DuckDB table
#[derive(Debug, Clone)]
pub struct DuckDbSink {
    /// Database file (or `:memory:`)
    path: PathBuf,
    /// Destination table
    table: String,
}

impl DuckDbSink {
    /// Create a sink; the database file is opened per call
    pub fn new(path: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table: table.into(),
        }
    }

    /// Table DDL, including the id sequence
    pub fn create_table_sql(&self) -> String {
        format!(
            "CREATE SEQUENCE IF NOT EXISTS {table}_id_seq;
             CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY DEFAULT nextval('{table}_id_seq'),
                step INTEGER,
                type VARCHAR({TYPE_MAX_LEN}) CHECK (length(type) <= {TYPE_MAX_LEN}),
                amount DOUBLE,
                nameorig VARCHAR({NAME_MAX_LEN}) CHECK (length(nameorig) <= {NAME_MAX_LEN}),
                oldbalanceorg DOUBLE,
                newbalanceorig DOUBLE,
                namedest VARCHAR({NAME_MAX_LEN}) CHECK (length(namedest) <= {NAME_MAX_LEN}),
                oldbalancedest DOUBLE,
                newbalancedest DOUBLE,
                isfraud SMALLINT,
                isflaggedfraud SMALLINT
             );",
            table = self.table
        )
    }

    fn open(&self) -> Result<Connection> {
        let conn = if self.path.as_os_str() == MEMORY {
            Connection::open_in_memory()
        } else {
            Connection::open(&self.path)
        };

        conn.map_err(|e| {
            Error::persistence(format!(
                "Failed to open DuckDB database {}: {e}",
                self.path.display()
            ))
        })
    }

    fn create_table(&self, conn: &Connection) -> Result<()> {
        conn.execute_batch(&self.create_table_sql())
            .map_err(|e| Error::persistence(format!("Failed to create table {}: {e}", self.table)))
    }

    fn write(&self, conn: &mut Connection, rows: &[Row]) -> Result<u64> {
        let tx = conn
            .transaction()
            .map_err(|e| Error::persistence(format!("Failed to begin transaction: {e}")))?;

        self.create_table(&tx)?;

        let placeholders = vec!["?"; TABLE_COLUMNS.len()].join(", ");
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            self.table,
            column_list()
        );

        let mut written = 0u64;
        {
            let mut stmt = tx
                .prepare(&insert_sql)
                .map_err(|e| Error::persistence(format!("Failed to prepare insert: {e}")))?;

            for row in rows {
                stmt.execute(params![
                    row.step,
                    row.kind,
                    row.amount,
                    row.name_orig,
                    row.old_balance_orig,
                    row.new_balance_orig,
                    row.name_dest,
                    row.old_balance_dest,
                    row.new_balance_dest,
                    row.is_fraud,
                    row.is_flagged_fraud,
                ])
                .map_err(|e| Error::persistence(format!("Failed to insert rows: {e}")))?;
                written += 1;
            }
        }

        // Dropping `tx` without commit rolls back
        tx.commit()
            .map_err(|e| Error::persistence(format!("Failed to commit transaction: {e}")))?;

        Ok(written)
    }

    /// Number of rows currently in the table
    pub fn row_count(&self) -> Result<u64> {
        let conn = self.open()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })
            .map_err(|e| Error::persistence(format!("Failed to count rows: {e}")))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl Sink for DuckDbSink {
    async fn ensure_schema(&self) -> Result<()> {
        let conn = self.open()?;
        self.create_table(&conn)?;
        tracing::info!(table = %self.table, "Ensured table exists");
        Ok(())
    }

    async fn bulk_insert(&self, records: &[Transaction]) -> Result<u64> {
        let rows = to_rows(records)?;
        let mut conn = self.open()?;
        let written = self.write(&mut conn, &rows)?;
        tracing::info!(table = %self.table, rows = written, "Inserted fraud transactions");
        Ok(written)
    }

    fn describe(&self) -> String {
        format!("duckdb://{} (table {})", self.path.display(), self.table)
    }
}
