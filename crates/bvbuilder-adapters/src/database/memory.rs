use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

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

/// Statement-recording stand-in for a MySQL server.
///
/// Clones share state. `CREATE TABLE IF NOT EXISTS` semantics are modelled
/// by remembering which tables exist.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    statements: Vec<String>,
    tables: BTreeSet<String>,
    databases: BTreeSet<String>,
    unreachable: bool,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the server refused the connection.
    pub fn unreachable() -> Self {
        let db = Self::default();
        if let Ok(mut inner) = db.inner.lock() {
            inner.unreachable = true;
        }
        db
    }

    /// Every statement executed so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.statements.clone())
            .unwrap_or_default()
    }

    pub fn tables(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.tables.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn databases(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.databases.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn with_connection<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> BvResult<T> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        if inner.unreachable {
            return Err(ApplicationError::database("connect ECONNREFUSED 127.0.0.1:3306").into());
        }
        Ok(f(&mut inner))
    }
}

impl SchemaProvisioner for MemoryDatabase {
    fn ensure_table(&self, schema: &TableSchema) -> BvResult<()> {
        self.with_connection(|inner| {
            inner.statements.push(schema.create_if_absent_sql());
            inner.tables.insert(schema.table().to_string());
        })
    }
}

impl DatabaseBootstrapper for MemoryDatabase {
    fn bootstrap(&self, database: &DatabaseName, script: &str) -> BvResult<()> {
        self.with_connection(|inner| {
            inner.statements.push(create_database_sql(database));
            inner.statements.push(use_database_sql(database));
            inner.statements.push(script.to_string());
            inner.databases.insert(database.to_string());
        })
    }
}
