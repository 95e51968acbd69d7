use serde::de::DeserializeOwned;

/// Load a TOML config from the path in `env_var`, else `default_path`.
/// Falls back to `T::default()` if the file is missing or unparseable.
pub fn load_or_default<T: DeserializeOwned + Default>(env_var: &str, default_path: &str) -> T {
    let path = std::env::var(env_var).unwrap_or_else(|_| default_path.to_string());
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_or_default(&content, &path),
        Err(_) => T::default(),
    }
}

/// Parse TOML text, logging and falling back to defaults on error.
pub fn parse_or_default<T: DeserializeOwned + Default>(content: &str, origin: &str) -> T {
    match toml::from_str::<T>(content) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("Failed to parse {origin}: {e}, using defaults");
            T::default()
        },
    }
}
