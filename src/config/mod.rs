pub const DEFAULT_MODEL: &str = "gpt-5";
pub const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration. Values come from the environment once, at startup;
/// nothing downstream reads the process environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub fetch_timeout_secs: u64,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            fetch_timeout_secs: 15,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Reads `OPENAI_API_KEY`, `OPENAI_MODEL` and `PORT`. A missing API key is
    /// left empty here; `TestCaseGenerator::new` rejects it so the failure
    /// surfaces at construction, before any request is served.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            cfg.api_key = key;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                cfg.model = model;
            }
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            cfg.port = port;
        }
        cfg
    }
}
