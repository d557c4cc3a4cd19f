use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "sked.toml";
pub const ENV_PREFIX: &str = "TODO_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub dbfile: String,
    /// Directory served for every path outside `/api`.
    pub web_dir: String,
    /// When set, the task API requires a signed-in token cookie.
    pub password: Option<String>,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Log filter directive, e.g. `info` or `sked=debug,sqlx=warn`.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7540,
            dbfile: "scheduler.db".to_string(),
            web_dir: "web".to_string(),
            password: None,
            jwt_secret: "change-me".to_string(),
            token_ttl_hours: 8,
            log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// The configured password, treating an empty value as unset.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}
