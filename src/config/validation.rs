use crate::config::types::{Config, CrawlerConfig, ProxyConfig, SearchConfig};
use crate::ConfigError;

/// Upper bound on the worker pool size
const MAX_THREADS_LIMIT: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_search_config(&config.search)?;
    validate_proxy_config(&config.proxy)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_threads < 1 || config.max_threads > MAX_THREADS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_threads must be between 1 and {}, got {}",
            MAX_THREADS_LIMIT, config.max_threads
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates the search engine template, when one is set
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let Some(template) = &config.engine_url_template else {
        return Ok(());
    };

    if template.is_empty() {
        return Err(ConfigError::Validation(
            "engine_url_template cannot be empty".to_string(),
        ));
    }

    // The keyword is appended verbatim, so only the scheme can be checked here
    if !template.starts_with("http://") && !template.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "engine_url_template must start with http:// or https://, got '{}'",
            template
        )));
    }

    Ok(())
}

/// Validates proxy configuration
fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    if config.host.is_empty() {
        return Err(ConfigError::Validation(
            "proxy host cannot be empty".to_string(),
        ));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation(
            "proxy port cannot be 0".to_string(),
        ));
    }

    if config.tor_binary.is_empty() {
        return Err(ConfigError::Validation(
            "tor_binary cannot be empty".to_string(),
        ));
    }

    if config.request_timeout == 0 || config.connect_timeout == 0 {
        return Err(ConfigError::Validation(format!(
            "timeouts must be > 0, got request={}s connect={}s",
            config.request_timeout, config.connect_timeout
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let mut config = Config::default();
        config.crawler.max_threads = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_too_many_threads_rejected() {
        let mut config = Config::default();
        config.crawler.max_threads = MAX_THREADS_LIMIT + 1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_depth_allowed() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_search_template_scheme() {
        let mut config = Config::default();
        config.search.engine_url_template = Some("ftp://search.onion/?q=".to_string());
        assert!(validate(&config).is_err());

        config.search.engine_url_template = Some("http://search.onion/?q=".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_search_template_rejected() {
        let mut config = Config::default();
        config.search.engine_url_template = Some(String::new());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_proxy_port_zero_rejected() {
        let mut config = Config::default();
        config.proxy.port = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.proxy.request_timeout = 0;
        assert!(validate(&config).is_err());
    }
}
