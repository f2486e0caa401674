use std::collections::HashSet;

/// Process configuration, resolved once at startup from the environment and
/// passed to handlers through `web::Data` rather than read ambiently.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    pub mongo_uri: String,
    pub mongo_db: String,

    /// Emails allowed into the admin panel, lowercased.
    pub admin_emails: HashSet<String>,

    pub identity_api_key: String,

    pub media_cloud_name: String,
    pub media_api_key: String,
    pub media_api_secret: String,

    pub textgen_api_key: String,
    pub textgen_model: String,
}

impl Config {
    pub fn from_env() -> Config {
        let config = Config {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "8080").parse().unwrap_or(8080),
            mongo_uri: var_or("MONGO_URI", "mongodb://localhost:27017"),
            mongo_db: var_or("MONGO_DB", "showcase"),
            admin_emails: parse_admin_emails(&var_or("ADMIN_EMAILS", "")),
            identity_api_key: var_or("IDENTITY_API_KEY", ""),
            media_cloud_name: var_or("MEDIA_CLOUD_NAME", ""),
            media_api_key: var_or("MEDIA_API_KEY", ""),
            media_api_secret: var_or("MEDIA_API_SECRET", ""),
            textgen_api_key: var_or("TEXTGEN_API_KEY", ""),
            textgen_model: var_or("TEXTGEN_MODEL", "gemini-2.0-flash"),
        };

        if config.admin_emails.is_empty() {
            log::warn!("ADMIN_EMAILS is empty, nobody can reach the admin panel");
        }

        config
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.contains(&email.trim().to_lowercase())
    }
}

fn var_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

fn parse_admin_emails(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_admins(raw: &str) -> Config {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mongo_uri: String::new(),
            mongo_db: String::new(),
            admin_emails: parse_admin_emails(raw),
            identity_api_key: String::new(),
            media_cloud_name: String::new(),
            media_api_key: String::new(),
            media_api_secret: String::new(),
            textgen_api_key: String::new(),
            textgen_model: String::new(),
        }
    }

    #[test]
    fn parses_comma_separated_allow_list() {
        let emails = parse_admin_emails(" One@Example.com , two@example.com ,, ");
        assert_eq!(emails.len(), 2);
        assert!(emails.contains("one@example.com"));
        assert!(emails.contains("two@example.com"));
    }

    #[test]
    fn admin_check_is_case_insensitive() {
        let config = config_with_admins("admin@example.com");
        assert!(config.is_admin_email("Admin@Example.COM"));
        assert!(config.is_admin_email("  admin@example.com "));
        assert!(!config.is_admin_email("visitor@example.com"));
    }

    #[test]
    fn empty_allow_list_denies_everyone() {
        let config = config_with_admins("");
        assert!(!config.is_admin_email("admin@example.com"));
        assert!(!config.is_admin_email(""));
    }
}
