use std::any::Any;

use steward_states::State;
use ustr::Ustr;

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub api_base_url: String,
    /// Optional bearer token for the admin endpoints.
    ///
    /// When present, every API call sends it via the `Authorization` header.
    pub authorization: Option<String>,
}

impl AdminConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            api_base_url: base_url,
            authorization: None,
        }
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(feature = "env_test") {
                "https://console-test.stewardhq.dev".to_owned()
            } else if cfg!(feature = "env_staging") {
                "https://console-staging.stewardhq.dev".to_owned()
            } else {
                "https://console.stewardhq.dev".to_owned()
            },
            authorization: std::env::var("STEWARD_ADMIN_TOKEN").ok(),
        }
    }
}

impl State for AdminConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}
