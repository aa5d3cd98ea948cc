//! Database adapters.
//!
//! - [`MySqlDatabase`]: one short-lived `sqlx` connection per call, driven by a
//!   current-thread tokio runtime built for that call.
//! - [`MemoryDatabase`]: records statements; can pretend the server is down.

mod memory;
mod mysql;

pub use memory::MemoryDatabase;
pub use mysql::MySqlDatabase;

use std::time::Duration;

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Selected after connecting; `None` connects at server level.
    pub database: Option<String>,
    pub connect_timeout: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3306,
            user: "root".into(),
            password: String::new(),
            database: None,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ConnectionSettings {
    /// `user@host:port/db`, never the password.
    pub fn describe(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user,
            self.host,
            self.port,
            self.database.as_deref().unwrap_or("")
        )
    }
}
