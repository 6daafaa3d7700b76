//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::LoadArgs, config::env::EnvManager, error::Result, models::LoadConfig};
use tracing::debug;

/// Builds a [`LoadConfig`] from defaults, `.env`, environment variables and flags, in that order
pub struct ConfigParser {
    args: LoadArgs,
    enable_color: bool,
}

impl ConfigParser {
    pub fn new(args: LoadArgs, enable_color: bool) -> Self {
        Self { args, enable_color }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<LoadConfig> {
        EnvManager::load_env_file()?;
        self.parse_without_env_file()
    }

    /// Same as [`parse`](Self::parse) but ignores any `.env` file
    pub fn parse_without_env_file(&self) -> Result<LoadConfig> {
        let mut config = LoadConfig::default();

        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        debug!(
            host = %config.host,
            requests = config.requests,
            concurrency = config.concurrency,
            timeout_secs = config.timeout_seconds,
            method = %config.method,
            output = %config.output,
            "configuration loaded"
        );

        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut LoadConfig) {
        let args = &self.args;

        if let Some(requests) = args.requests {
            config.requests = requests;
        }
        if let Some(concurrency) = args.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout) = args.timeout {
            config.timeout_seconds = timeout;
        }
        if let Some(ref host) = args.host {
            config.host = host.clone();
        }
        if let Some(ref method) = args.method {
            config.method = method.clone();
        }
        if let Some(ref output) = args.output {
            config.output = output.clone();
        }
        if args.body.is_some() {
            config.body_path = args.body.clone();
        }
        if args.headers.is_some() {
            config.headers_path = args.headers.clone();
        }
        if !self.enable_color {
            config.enable_color = false;
        }
    }
}

/// Convenience function to load the `load` configuration
pub fn load_config(args: LoadArgs, enable_color: bool) -> Result<LoadConfig> {
    ConfigParser::new(args, enable_color).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &LoadConfig) -> String {
    let mut summary = vec![
        format!("Host: {}", config.host),
        format!("Method: {}", config.method),
        format!("Requests: {}", config.requests),
        format!("Concurrency: {}", config.concurrency),
        format!("Timeout: {}s", config.timeout_seconds),
        format!("Output: {}", config.output),
    ];

    if let Some(ref path) = config.headers_path {
        summary.push(format!("Headers file: {}", path.display()));
    }
    if let Some(ref path) = config.body_path {
        summary.push(format!("Body file: {}", path.display()));
    }

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "BENCHUTIL_REQUESTS",
        "BENCHUTIL_CONCURRENCY",
        "BENCHUTIL_TIMEOUT",
        "BENCHUTIL_HOST",
        "BENCHUTIL_METHOD",
        "BENCHUTIL_OUTPUT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn args(host: &str, requests: i64) -> LoadArgs {
        LoadArgs {
            host: Some(host.to_string()),
            requests: Some(requests),
            ..Default::default()
        }
    }

    #[test]
    fn test_cli_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let args = LoadArgs {
            concurrency: Some(8),
            timeout: Some(5),
            method: Some("POST".to_string()),
            output: Some("yaml".to_string()),
            body: Some(PathBuf::from("body.bin")),
            headers: Some(PathBuf::from("headers.json")),
            ..args("http://localhost:8080", 40)
        };
        let config = ConfigParser::new(args, false).parse_without_env_file().unwrap();

        assert_eq!(config.host, "http://localhost:8080");
        assert_eq!(config.requests, 40);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.method, "POST");
        assert_eq!(config.output, "yaml");
        assert_eq!(config.body_path, Some(PathBuf::from("body.bin")));
        assert_eq!(config.headers_path, Some(PathBuf::from("headers.json")));
        assert!(!config.enable_color);
    }

    #[test]
    fn test_env_vars_fill_missing_flags() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("BENCHUTIL_HOST", "http://env-host:9000");
        env::set_var("BENCHUTIL_REQUESTS", "7");
        env::set_var("BENCHUTIL_OUTPUT", "json");

        let config = ConfigParser::new(LoadArgs::default(), true).parse_without_env_file();
        clear_env();
        let config = config.unwrap();

        assert_eq!(config.host, "http://env-host:9000");
        assert_eq!(config.requests, 7);
        assert_eq!(config.output, "json");
        assert!(config.enable_color);
    }

    #[test]
    fn test_cli_overrides_env_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("BENCHUTIL_REQUESTS", "8");

        let config = ConfigParser::new(args("http://localhost", 12), true).parse_without_env_file();
        clear_env();

        assert_eq!(config.unwrap().requests, 12);
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("BENCHUTIL_CONCURRENCY", "many");

        let result = ConfigParser::new(args("http://localhost", 1), true).parse_without_env_file();
        clear_env();

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("BENCHUTIL_CONCURRENCY"));
    }

    #[test]
    fn test_validation_runs_after_merge() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let err = ConfigParser::new(LoadArgs { requests: Some(3), ..Default::default() }, true)
            .parse_without_env_file()
            .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: empty host");

        let err = ConfigParser::new(LoadArgs { timeout: Some(0), ..args("http://localhost", 3) }, true)
            .parse_without_env_file()
            .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: invalid timeout value - 0");
    }

    #[test]
    fn test_config_summary() {
        let config = LoadConfig {
            host: "http://localhost".to_string(),
            requests: 5,
            headers_path: Some(PathBuf::from("h.yaml")),
            ..Default::default()
        };
        let summary = display_config_summary(&config);

        assert!(summary.contains("Host: http://localhost"));
        assert!(summary.contains("Requests: 5"));
        assert!(summary.contains("Timeout: 1s"));
        assert!(summary.contains("Headers file: h.yaml"));
        assert!(!summary.contains("Body file"));
    }
}
