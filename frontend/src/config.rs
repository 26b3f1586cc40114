use serde::Deserialize;

/// Id of the inline JSON element the host page uses to hand us settings.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Page-wide settings, injected once at startup and shared through a
/// `ContextProvider<Config>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub leads_base_url: String,
    pub language: String,
    pub api_timeout_ms: u32,
    pub typing_speed_ms: u32,
    pub pipeline_step_ms: u32,
    pub counter_duration_ms: u32,
    pub scroll_offset: f64,
    pub observer_threshold: f64,
    pub hero_max_chars: usize,
    pub notice_ms: u32,
    pub autorun_delay_ms: u32,
    pub autorun_pause_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("CODEGRAPH_API_URL")
                .unwrap_or("http://localhost:8000")
                .to_string(),
            leads_base_url: option_env!("CODEGRAPH_LEADS_URL")
                .unwrap_or("http://localhost:8001")
                .to_string(),
            language: "ru".to_string(),
            // LLM-backed answers regularly take over a minute.
            api_timeout_ms: 180_000,
            typing_speed_ms: 50,
            pipeline_step_ms: 800,
            counter_duration_ms: 2_000,
            scroll_offset: 80.0,
            observer_threshold: 0.1,
            hero_max_chars: 300,
            notice_ms: 3_000,
            autorun_delay_ms: 1_500,
            autorun_pause_ms: 500,
        }
    }
}

impl Config {
    /// Parses a JSON settings blob; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: Config = serde_json::from_str(raw)?;
        config.api_base_url = trim_base(&config.api_base_url);
        config.leads_base_url = trim_base(&config.leads_base_url);
        Ok(config)
    }

    /// Reads settings from the host page, falling back to defaults.
    pub fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring malformed landing config: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn demo_chat_url(&self) -> String {
        format!("{}/api/v1/demo/chat", self.api_base_url)
    }

    pub fn leads_url(&self) -> String {
        format!("{}/api/v1/leads", self.leads_base_url)
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
