use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    /// PostgreSQL via DATABASE_URL
    Postgres,
    /// In-process tables, lost on exit
    Memory,
}

#[derive(Debug, Parser)]
#[command(name = "items-api", version, about = "Basic-auth CRUD API for user-owned items")]
pub struct ServeArgs {
    #[arg(long, help = "Bind address (overrides API_HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Listen port (overrides API_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, value_enum, default_value_t = StorageKind::Postgres, help = "Storage backend")]
    pub storage: StorageKind,

    #[arg(long, help = "Do not apply schema migrations at startup")]
    pub skip_migrations: bool,
}

impl ServeArgs {
    /// Bind address after applying command-line overrides to config
    pub fn bind_addr(&self, config: &crate::config::ApiConfig) -> String {
        let host = self.host.as_deref().unwrap_or(&config.host);
        let port = self.port.unwrap_or(config.port);
        format!("{}:{}", host, port)
    }
}
