//! Configuration types, built from environment variables.

use secrecy::SecretString;

use crate::error::ConfigError;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Capacity of the notification queue between handlers and the worker.
    pub notify_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            notify_queue_capacity: 64,
        }
    }
}

impl ServerConfig {
    /// Build config from `ESG_INTERVIEW_HOST`, `ESG_INTERVIEW_PORT` and
    /// `ESG_NOTIFY_QUEUE`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = std::env::var("ESG_INTERVIEW_HOST").unwrap_or(defaults.host);
        let port = parse_var("ESG_INTERVIEW_PORT", defaults.port)?;
        let notify_queue_capacity = parse_var("ESG_NOTIFY_QUEUE", defaults.notify_queue_capacity)?;
        if notify_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ESG_NOTIFY_QUEUE".into(),
                message: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            host,
            port,
            notify_queue_capacity,
        })
    }

    /// `host:port` socket address string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SMTP settings for lead notification emails.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    /// Sales team addresses that receive every lead.
    pub recipients: Vec<String>,
}

impl SmtpConfig {
    /// Build config from environment variables.
    ///
    /// Returns `Ok(None)` if `LEAD_SMTP_HOST` is not set (email disabled).
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(host) = std::env::var("LEAD_SMTP_HOST") else {
            return Ok(None);
        };

        let port = parse_var("LEAD_SMTP_PORT", 587u16)?;
        let username = std::env::var("LEAD_SMTP_USERNAME").unwrap_or_default();
        let password = SecretString::from(std::env::var("LEAD_SMTP_PASSWORD").unwrap_or_default());
        let from_address = std::env::var("LEAD_FROM_ADDRESS").unwrap_or_else(|_| username.clone());
        let recipients = split_list(&std::env::var("LEAD_NOTIFY_RECIPIENTS").unwrap_or_default());

        if recipients.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "LEAD_NOTIFY_RECIPIENTS".into(),
                hint: "Set a comma-separated list of sales addresses when LEAD_SMTP_HOST is set."
                    .into(),
            });
        }
        if from_address.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "LEAD_FROM_ADDRESS".into(),
                hint: "Set a sender address or LEAD_SMTP_USERNAME.".into(),
            });
        }

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            from_address,
            recipients,
        }))
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.notify_queue_capacity, 64);
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" sales@esg.example , ,ops@esg.example"),
            vec!["sales@esg.example".to_string(), "ops@esg.example".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn parse_var_uses_default_when_unset() {
        // SAFETY: this variable is only touched by this test.
        unsafe { std::env::remove_var("ESG_TEST_UNSET_PORT") };
        assert_eq!(parse_var("ESG_TEST_UNSET_PORT", 9000u16).unwrap(), 9000);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        // SAFETY: this variable is only touched by this test.
        unsafe { std::env::set_var("ESG_TEST_BAD_PORT", "eighty") };
        let err = parse_var("ESG_TEST_BAD_PORT", 80u16).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "ESG_TEST_BAD_PORT"));
    }

    #[test]
    fn smtp_disabled_without_host() {
        // SAFETY: this test is the only reader of LEAD_SMTP_HOST.
        unsafe { std::env::remove_var("LEAD_SMTP_HOST") };
        assert!(SmtpConfig::from_env().unwrap().is_none());
    }
}
