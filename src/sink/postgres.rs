//! PostgreSQL sink

use super::{column_list, to_rows, Row, Sink, NAME_MAX_LEN, TABLE_COLUMNS, TYPE_MAX_LEN};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::record::Transaction;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Postgres, QueryBuilder};

/// PostgreSQL caps a statement at 65535 bind parameters
const MAX_BIND_PARAMS: usize = 65_535;

/// Rows per INSERT statement
const ROWS_PER_STATEMENT: usize = MAX_BIND_PARAMS / TABLE_COLUMNS.len();

/// Sink writing into a PostgreSQL table
#[derive(Debug, Clone)]
pub struct PostgresSink {
    config: DatabaseConfig,
    table: String,
}

impl PostgresSink {
    /// Create a sink; no connection is made until a call needs one
    pub fn new(config: DatabaseConfig, table: impl Into<String>) -> Self {
        Self {
            config,
            table: table.into(),
        }
    }

    /// Table DDL
    pub fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id SERIAL PRIMARY KEY,
                step INT,
                type VARCHAR({TYPE_MAX_LEN}),
                amount FLOAT,
                nameorig VARCHAR({NAME_MAX_LEN}),
                oldbalanceorg FLOAT,
                newbalanceorig FLOAT,
                namedest VARCHAR({NAME_MAX_LEN}),
                oldbalancedest FLOAT,
                newbalancedest FLOAT,
                isfraud SMALLINT,
                isflaggedfraud SMALLINT
            )",
            table = self.table
        )
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .database(&self.config.database)
            .username(&self.config.user)
            .password(&self.config.password)
    }

    async fn connect(&self) -> Result<PgConnection> {
        let conn = PgConnection::connect_with(&self.connect_options())
            .await
            .map_err(|e| {
                Error::persistence(format!(
                    "Failed to connect to {}: {e}",
                    self.config.connection_info()
                ))
            })?;
        tracing::info!(target_db = %self.config.connection_info(), "Database connection established");
        Ok(conn)
    }

    /// Close the connection; the outcome of the work done on it wins
    async fn release<T>(conn: PgConnection, outcome: Result<T>) -> Result<T> {
        match conn.close().await {
            Ok(()) => tracing::info!("Database connection closed"),
            Err(e) => tracing::warn!(error = %e, "Failed to close database connection cleanly"),
        }
        outcome
    }

    async fn create_table(&self, conn: &mut PgConnection) -> Result<()> {
        sqlx::query(&self.create_table_sql())
            .execute(conn)
            .await
            .map_err(|e| Error::persistence(format!("Failed to create table {}: {e}", self.table)))?;
        Ok(())
    }

    async fn write(&self, conn: &mut PgConnection, rows: Vec<Row>) -> Result<u64> {
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| Error::persistence(format!("Failed to begin transaction: {e}")))?;

        self.create_table(&mut tx).await?;

        let mut written = 0;
        let mut rows = rows.into_iter().peekable();
        while rows.peek().is_some() {
            let chunk: Vec<Row> = rows.by_ref().take(ROWS_PER_STATEMENT).collect();
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("INSERT INTO {} ({}) ", self.table, column_list()));

            builder.push_values(chunk, |mut b, row| {
                b.push_bind(row.step)
                    .push_bind(row.kind)
                    .push_bind(row.amount)
                    .push_bind(row.name_orig)
                    .push_bind(row.old_balance_orig)
                    .push_bind(row.new_balance_orig)
                    .push_bind(row.name_dest)
                    .push_bind(row.old_balance_dest)
                    .push_bind(row.new_balance_dest)
                    .push_bind(row.is_fraud)
                    .push_bind(row.is_flagged_fraud);
            });

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| Error::persistence(format!("Failed to insert rows: {e}")))?;
            written += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| Error::persistence(format!("Failed to commit transaction: {e}")))?;

        Ok(written)
    }
}

#[async_trait]
impl Sink for PostgresSink {
    async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        let outcome = self.create_table(&mut conn).await;
        Self::release(conn, outcome).await?;
        tracing::info!(table = %self.table, "Ensured table exists");
        Ok(())
    }

    async fn bulk_insert(&self, records: &[Transaction]) -> Result<u64> {
        let rows = to_rows(records)?;
        let mut conn = self.connect().await?;
        let outcome = self.write(&mut conn, rows).await;
        let written = Self::release(conn, outcome).await?;
        tracing::info!(table = %self.table, rows = written, "Inserted fraud transactions");
        Ok(written)
    }

    fn describe(&self) -> String {
        format!("{} (table {})", self.config.connection_info(), self.table)
    }
}
