use std::fmt;

use serde::Serialize;

use crate::types::{AppError, AppResult};

/// An HTTP endpoint under test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
}

impl Target {
    /// Parse a target address of the form `[http://]host[:port][/path]`.
    pub fn parse(input: &str) -> AppResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::Config("target address is empty".to_string()));
        }

        let (scheme, rest) = match trimmed.split_once("://") {
            Some((scheme, rest)) => {
                if scheme != "http" && scheme != "https" {
                    return Err(AppError::Config(format!(
                        "unsupported scheme '{scheme}' in target '{trimmed}'"
                    )));
                }
                (scheme.to_string(), rest)
            }
            None => ("http".to_string(), trimmed),
        };

        let (authority, path) = match rest.split_once('/') {
            Some((authority, path)) => (authority, format!("/{path}")),
            None => (rest, "/".to_string()),
        };

        if authority.is_empty() {
            return Err(AppError::Config(format!(
                "target '{trimmed}' is missing a host"
            )));
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port_str)) => {
                let port = port_str.parse::<u16>().map_err(|_| {
                    AppError::Config(format!("invalid port '{port_str}' in target '{trimmed}'"))
                })?;
                if host.is_empty() {
                    return Err(AppError::Config(format!(
                        "target '{trimmed}' is missing a host"
                    )));
                }
                (host.to_string(), Some(port))
            }
            None => (authority.to_string(), None),
        };

        Ok(Target {
            scheme,
            host,
            port,
            path,
        })
    }

    /// Full request URL for this target.
    pub fn url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}{}", self.scheme, self.host, port, self.path),
            None => format!("{}://{}{}", self.scheme, self.host, self.path),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_host() {
        let target = Target::parse("10.0.1.10").unwrap();
        assert_eq!(target.scheme, "http");
        assert_eq!(target.host, "10.0.1.10");
        assert_eq!(target.port, None);
        assert_eq!(target.url(), "http://10.0.1.10/");
    }

    #[test]
    fn parses_host_port_and_path() {
        let target = Target::parse("lb.internal:8080/healthz").unwrap();
        assert_eq!(target.host, "lb.internal");
        assert_eq!(target.port, Some(8080));
        assert_eq!(target.path, "/healthz");
        assert_eq!(target.url(), "http://lb.internal:8080/healthz");
    }

    #[test]
    fn parses_explicit_scheme() {
        let target = Target::parse("https://example.com/").unwrap();
        assert_eq!(target.scheme, "https");
        assert_eq!(target.url(), "https://example.com/");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Target::parse("").is_err());
        assert!(Target::parse("ftp://example.com").is_err());
        assert!(Target::parse("host:notaport").is_err());
        assert!(Target::parse(":8080").is_err());
    }
}
