use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub glyphs: GlyphsConfig,
    #[serde(default)]
    pub qa: QaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Location and input geometry of the classification model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_class_map_path")]
    pub class_map_path: String,
    #[serde(default = "default_input_size")]
    pub input_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphsConfig {
    #[serde(default = "default_mapping_path")]
    pub mapping_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaConfig {
    /// API key for the chat-completion service. Left empty, the question
    /// endpoints report unavailable. `OPENAI_API_KEY` in the environment
    /// takes precedence over this field.
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_qa_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            class_map_path: default_class_map_path(),
            input_size: default_input_size(),
        }
    }
}

impl Default for GlyphsConfig {
    fn default() -> Self {
        Self {
            mapping_path: default_mapping_path(),
        }
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model: default_qa_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_path() -> String {
    "models/hiero_model.onnx".to_string()
}

fn default_class_map_path() -> String {
    "data/class_map.csv".to_string()
}

fn default_input_size() -> u32 {
    224
}

fn default_mapping_path() -> String {
    "data/mapping.json".to_string()
}

fn default_qa_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}
