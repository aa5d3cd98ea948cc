use std::future::Future;

use sqlx::{
    Connection,
    mysql::{MySqlConnectOptions, MySqlConnection},
};
use tracing::{debug, instrument};

use bvbuilder_core::{
    application::{
        ApplicationError,
        ports::{DatabaseBootstrapper, SchemaProvisioner},
    },
    domain::{
        DatabaseName, TableSchema,
        schema::{create_database_sql, use_database_sql},
    },
    error::BvResult,
};

use super::ConnectionSettings;

/// MySQL adapter for both database ports.
#[derive(Debug, Clone)]
pub struct MySqlDatabase {
    settings: ConnectionSettings,
}

impl MySqlDatabase {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    fn connect_options(&self, database: Option<&str>) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.settings.host)
            .port(self.settings.port)
            .username(&self.settings.user)
            .password(&self.settings.password);
        match database {
            Some(db) => options.database(db),
            None => options,
        }
    }

    async fn connect(&self, database: Option<&str>) -> BvResult<MySqlConnection> {
        let options = self.connect_options(database);
        let timeout = self.settings.connect_timeout;

        match tokio::time::timeout(timeout, MySqlConnection::connect_with(&options)).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(ApplicationError::database(format!(
                "cannot connect to {}: {e}",
                self.settings.describe()
            ))
            .into()),
            Err(_) => Err(ApplicationError::database(format!(
                "timed out after {}s connecting to {}:{}",
                timeout.as_secs(),
                self.settings.host,
                self.settings.port
            ))
            .into()),
        }
    }

    /// Run `statements` on one connection, then close it whatever happened.
    async fn execute_all(&self, database: Option<&str>, statements: &[&str]) -> BvResult<()> {
        let mut conn = self.connect(database).await?;

        let mut outcome = Ok(());
        for sql in statements {
            debug!(sql = %sql, "Executing");
            if let Err(e) = sqlx::raw_sql(sql).execute(&mut conn).await {
                outcome = Err(ApplicationError::database(e.to_string()));
                break;
            }
        }

        let closed = conn.close().await;
        outcome?;
        closed.map_err(|e| ApplicationError::database(e.to_string()))?;
        Ok(())
    }
}

/// Drive one database call on a throwaway current-thread runtime.
fn block_on<T>(future: impl Future<Output = BvResult<T>>) -> BvResult<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ApplicationError::database(format!("failed to start runtime: {e}")))?;
    runtime.block_on(future)
}

impl SchemaProvisioner for MySqlDatabase {
    #[instrument(skip_all, fields(table = %schema.table(), server = %self.settings.describe()))]
    fn ensure_table(&self, schema: &TableSchema) -> BvResult<()> {
        let sql = schema.create_if_absent_sql();
        block_on(self.execute_all(self.settings.database.as_deref(), &[sql.as_str()]))
    }
}

impl DatabaseBootstrapper for MySqlDatabase {
    #[instrument(skip_all, fields(database = %database, host = %self.settings.host))]
    fn bootstrap(&self, database: &DatabaseName, script: &str) -> BvResult<()> {
        let create = create_database_sql(database);
        let select = use_database_sql(database);
        block_on(self.execute_all(None, &[create.as_str(), select.as_str(), script]))
    }
}
