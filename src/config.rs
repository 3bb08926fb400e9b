//! Server configuration

/// Application configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Path to the SQLite database. When unset the server keeps all state
    /// in memory and loses it on restart.
    pub database: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let database = std::env::var("WISHLIST_DB").ok().filter(|p| !p.is_empty());

        Self { port, database }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database: None,
        }
    }
}
