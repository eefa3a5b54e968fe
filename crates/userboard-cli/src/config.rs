//! Server configuration loading.
//!
//! Reads the `[server]` section from `config/userboard.toml` and falls back
//! to the built-in defaults when the file or section is absent.

use userboard_web::WebConfig;

/// Load the web server configuration from `config/userboard.toml`.
pub fn load_web_config() -> WebConfig {
    match std::fs::read_to_string("config/userboard.toml") {
        Ok(content) => parse_web_config(&content),
        Err(_) => WebConfig::default(),
    }
}

/// Parse the `[server]` section out of a toml document.
fn parse_web_config(content: &str) -> WebConfig {
    let defaults = WebConfig::default();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(error = %e, "config/userboard.toml is malformed, using defaults");
            return defaults;
        }
    };

    let server = match table.get("server") {
        Some(toml::Value::Table(s)) => s,
        _ => return defaults,
    };

    WebConfig {
        bind_addr: server
            .get("bind_addr")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .unwrap_or(defaults.bind_addr),
        port: server
            .get("port")
            .and_then(|v| v.as_integer())
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(defaults.port),
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_section_is_read() {
        let config = parse_web_config("[server]\nbind_addr = \"0.0.0.0\"\nport = 8080\n");
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_section_falls_back_to_defaults() {
        let config = parse_web_config("[other]\nkey = 1\n");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse_web_config("[server]\nport = 9000\n");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn out_of_range_port_is_ignored() {
        let config = parse_web_config("[server]\nport = 99999\n");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let config = parse_web_config("not [valid toml");
        assert_eq!(config.port, 3000);
    }
}
