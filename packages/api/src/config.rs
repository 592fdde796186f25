//! Server configuration read from the environment.

use db::DbConfig;

/// Settings for the job board server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Database connection settings.
    pub db: DbConfig,
    /// Insert demo postings when the board is empty.
    pub seed_demo: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            db: DbConfig::memory(),
            seed_demo: true,
        }
    }
}

impl BoardConfig {
    /// Build the config from process environment variables.
    ///
    /// - `JOBBOARD_DB_PATH`: persist to RocksDB at this path, in-memory otherwise
    ///   (needs the `rocksdb` feature)
    /// - `JOBBOARD_NAMESPACE` / `JOBBOARD_DATABASE`: SurrealDB namespace and database
    /// - `JOBBOARD_DB_USER` / `JOBBOARD_DB_PASS`: root credentials, used when both are set
    /// - `JOBBOARD_SEED_DEMO`: set to `false` or `0` to skip demo data
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut db = match lookup("JOBBOARD_DB_PATH").filter(|p| !p.is_empty()) {
            Some(path) => DbConfig::rocksdb(path),
            None => DbConfig::memory(),
        };

        if let Some(namespace) = lookup("JOBBOARD_NAMESPACE") {
            db = db.with_namespace(namespace);
        }
        if let Some(database) = lookup("JOBBOARD_DATABASE") {
            db = db.with_database(database);
        }
        if let (Some(user), Some(pass)) = (lookup("JOBBOARD_DB_USER"), lookup("JOBBOARD_DB_PASS")) {
            db = db.with_credentials(user, pass);
        }

        let seed_demo = lookup("JOBBOARD_SEED_DEMO")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self { db, seed_demo }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> BoardConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BoardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_with_demo_data() {
        let config = config_from(&[]);
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.db.endpoint, "mem://");
    }

    #[test]
    fn db_path_selects_rocksdb() {
        let config = config_from(&[("JOBBOARD_DB_PATH", "./data/board")]);
        assert_eq!(config.db.endpoint, "rocksdb://./data/board");
    }

    #[test]
    fn namespace_and_database_override() {
        let config = config_from(&[
            ("JOBBOARD_NAMESPACE", "staging"),
            ("JOBBOARD_DATABASE", "jobs"),
        ]);
        assert_eq!(config.db.namespace, "staging");
        assert_eq!(config.db.database, "jobs");
    }

    #[test]
    fn credentials_need_user_and_password() {
        let config = config_from(&[
            ("JOBBOARD_DB_USER", "root"),
            ("JOBBOARD_DB_PASS", "secret"),
        ]);
        assert_eq!(
            config.db.credentials,
            Some(("root".to_string(), "secret".to_string()))
        );

        assert!(config_from(&[("JOBBOARD_DB_USER", "root")]).db.credentials.is_none());
    }

    #[test]
    fn seeding_can_be_disabled() {
        assert!(!config_from(&[("JOBBOARD_SEED_DEMO", "false")]).seed_demo);
        assert!(!config_from(&[("JOBBOARD_SEED_DEMO", "0")]).seed_demo);
        assert!(config_from(&[("JOBBOARD_SEED_DEMO", "yes")]).seed_demo);
    }
}
