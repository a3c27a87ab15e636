use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Defaults, then an optional `trivia.*` file, then `TRIVIA_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA"))
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_joins_host_and_port() {
        let settings = Settings {
            database_url: "sqlite::memory:".to_owned(),
            host: "127.0.0.1".to_owned(),
            port: 3000,
        };
        assert_eq!(settings.address(), "127.0.0.1:3000");
    }

    #[test]
    fn file_values_deserialize() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "database_url = \"sqlite:test.db\"\nhost = \"localhost\"\nport = 9000",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.database_url, "sqlite:test.db");
        assert_eq!(settings.port, 9000);
    }
}
