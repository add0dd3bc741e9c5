use anyhow::Result;
use serde::Deserialize;
use std::env;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub model: String,
    pub api_base: String,
    pub gemini_api_key: Option<String>,
}

impl LLMConfig {
    /// The API key for the configured provider, if one is set
    pub fn active_api_key(&self) -> Option<String> {
        match self.provider.as_str() {
            "google" | "gemini" => self.gemini_api_key.clone(),
            _ => None,
        }
    }
}

// Keeps the API key out of startup logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Path or name of the tesseract executable
    pub tesseract_cmd: String,
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                port: var("PORT", "8000").parse()?,
                host: var("HOST", "0.0.0.0"),
            },
            llm: LLMConfig {
                provider: var("LLM_PROVIDER", "google"),
                model: var("LLM_MODEL", DEFAULT_MODEL),
                api_base: var("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE)
                    .trim_end_matches('/')
                    .to_string(),
                gemini_api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            },
            ocr: OcrConfig {
                tesseract_cmd: var("TESSERACT_CMD", "tesseract"),
                language: var("TESSERACT_LANG", "eng"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.provider, "google");
        assert_eq!(config.llm.model, "gemini-3-flash-preview");
        assert_eq!(config.llm.api_base, DEFAULT_GEMINI_API_BASE);
        assert!(config.llm.gemini_api_key.is_none());
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
        assert_eq!(config.ocr.language, "eng");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9100"),
            ("GEMINI_API_KEY", "abc"),
            ("GEMINI_API_BASE", "http://localhost:1234/"),
            ("TESSERACT_CMD", r"C:\Program Files\Tesseract-OCR\tesseract.exe"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.llm.active_api_key().as_deref(), Some("abc"));
        assert_eq!(config.llm.api_base, "http://localhost:1234");
        assert_eq!(
            config.ocr.tesseract_cmd,
            r"C:\Program Files\Tesseract-OCR\tesseract.exe"
        );
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.llm.active_api_key().is_none());
    }

    #[test]
    fn test_gemini_provider_alias_uses_gemini_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("LLM_PROVIDER", "gemini"),
            ("GEMINI_API_KEY", "abc"),
        ]))
        .unwrap();
        assert_eq!(config.llm.active_api_key().as_deref(), Some("abc"));
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "not-a-port")])).is_err());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "secret-key")])).unwrap();
        let rendered = format!("{:?}", config.llm);
        assert!(!rendered.contains("secret-key"));
    }
}
