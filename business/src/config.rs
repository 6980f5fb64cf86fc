use serde::Deserialize;
use ustr::Ustr;

/// Environment variables recognised by [`BusinessConfig::from_env`], without
/// the `DASHBOARD_` prefix.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default)]
    lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub auth_token: Option<String>,
    /// Namespace used for column title lookups, e.g. `user`. Tables fall
    /// back to their resource name when unset.
    pub lang: Option<Ustr>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Read `DASHBOARD_API_BASE_URL`, `DASHBOARD_AUTH_TOKEN` and `DASHBOARD_LANG`.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw: RawConfig = serde_env::from_env_with_prefix("DASHBOARD")?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: raw
                .api_base_url
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.api_base_url),
            auth_token: raw.auth_token.filter(|token| !token.is_empty()),
            lang: raw
                .lang
                .filter(|lang| !lang.is_empty())
                .map(|lang| Ustr::from(lang.as_str())),
        }
    }

    /// Base of the REST API, `<api_base_url>/api`.
    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(format!("{}/api", self.api_base_url).as_str())
        }
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Title namespace for the `resource` table.
    pub fn lang_for(&self, resource: &str) -> Ustr {
        self.lang.unwrap_or_else(|| Ustr::from(resource))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else {
                "http://127.0.0.1:8080".to_owned()
            },
            auth_token: None,
            lang: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_env::from_iter;

    #[test]
    fn api_url_appends_api_segment() {
        let config = BusinessConfig::new("https://panel.example.com");
        assert_eq!(config.api_url(), Ustr::from("https://panel.example.com/api"));

        let relative = BusinessConfig::new("");
        assert_eq!(relative.api_url(), Ustr::from("/api"));
    }

    #[test]
    fn raw_config_overrides_defaults() {
        let raw: RawConfig = from_iter(vec![
            ("API_BASE_URL", "https://panel.example.com/"),
            ("AUTH_TOKEN", "secret"),
            ("LANG", "user"),
        ])
        .expect("RawConfig should deserialize");

        let config = BusinessConfig::from_raw(raw);
        assert_eq!(config.api_base_url, "https://panel.example.com");
        assert_eq!(config.auth_token(), Some("secret"));
        assert_eq!(config.lang_for("node"), Ustr::from("user"));
    }

    #[test]
    fn empty_token_is_ignored() {
        let raw: RawConfig =
            from_iter(vec![("AUTH_TOKEN", "")]).expect("RawConfig should deserialize");

        let config = BusinessConfig::from_raw(raw);
        assert_eq!(config.auth_token(), None);
        assert_eq!(config.lang_for("node"), Ustr::from("node"));
    }
}
