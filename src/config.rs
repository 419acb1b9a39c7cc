use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub store: StoreKind,
    /// Bcrypt cost used when hashing user passwords.
    pub password_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    Invalid { key: &'static str, value: String },
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreKind::Mongo),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(()),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let password_cost = parse(&lookup, "BCRYPT_COST", 10)?;
        if !(4..=31).contains(&password_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: password_cost.to_string(),
            });
        }

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| String::from("127.0.0.1")),
            port: parse(&lookup, "PORT", 8000)?,
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| String::from("mongodb://localhost:27017")),
            mongodb_database: lookup("MONGODB_DATABASE")
                .unwrap_or_else(|| String::from("accidents")),
            store: parse(&lookup, "STORE", StoreKind::Mongo)?,
            password_cost,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config(&[]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.store, StoreKind::Mongo);
        assert_eq!(config.password_cost, 10);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = config(&[("PORT", "9090"), ("STORE", "Memory"), ("BCRYPT_COST", "4")]).unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.password_cost, 4);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            config(&[("STORE", "postgres")]),
            Err(ConfigError::Invalid { key: "STORE", .. })
        ));
        assert!(matches!(
            config(&[("BCRYPT_COST", "2")]),
            Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })
        ));
    }
}
