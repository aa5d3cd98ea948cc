//! SQL statements the tool is allowed to issue.
//!
//! Identifiers reaching this module have already been validated
//! ([`ResourceNames`], [`DatabaseName`]), so backtick quoting is enough.

use crate::domain::{naming::ResourceNames, value_objects::DatabaseName};

/// The fixed shape of every provisioned resource table.
pub const RESOURCE_COLUMNS: [(&str, &str); 3] = [
    ("id", "INT AUTO_INCREMENT PRIMARY KEY"),
    ("name", "VARCHAR(255) NOT NULL"),
    ("created_at", "TIMESTAMP DEFAULT CURRENT_TIMESTAMP"),
];

/// Bootstrap script run by `init` when no `--sql` file is given.
pub const BOOTSTRAP_USERS_SQL: &str = "\
CREATE TABLE IF NOT EXISTS `users` (
    `id` INT AUTO_INCREMENT PRIMARY KEY,
    `name` VARCHAR(255) NOT NULL,
    `email` VARCHAR(255) NOT NULL UNIQUE,
    `password` VARCHAR(255) NOT NULL,
    `role` VARCHAR(50) NOT NULL DEFAULT 'user',
    `created_at` TIMESTAMP DEFAULT CURRENT_TIMESTAMP
) ENGINE=InnoDB;
";

/// Table definition for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table: String,
}

impl TableSchema {
    pub fn for_resource(names: &ResourceNames) -> Self {
        Self {
            table: names.table_name.clone(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// `CREATE TABLE IF NOT EXISTS` with the fixed three-column shape.
    pub fn create_if_absent_sql(&self) -> String {
        let columns = RESOURCE_COLUMNS
            .iter()
            .map(|(name, ty)| format!("`{name}` {ty}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "CREATE TABLE IF NOT EXISTS `{}` ({columns}) ENGINE=InnoDB",
            self.table
        )
    }
}

pub fn create_database_sql(name: &DatabaseName) -> String {
    format!("CREATE DATABASE IF NOT EXISTS `{name}`")
}

pub fn use_database_sql(name: &DatabaseName) -> String {
    format!("USE `{name}`")
}
