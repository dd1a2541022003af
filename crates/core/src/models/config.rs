use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// Microphone capture parameters, consumed once per recording session.
///
/// Every field carries a serde default so a partially-populated `audio`
/// section from an older config file deserializes with the documented
/// values filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Capture sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Number of input channels (1 = mono).
    #[serde(default = "default_channels")]
    pub channels: u16,
    /// Frames per buffer handed to the input stream.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
    /// Sample format name (e.g. `"int16"`).
    #[serde(default = "default_sample_format")]
    pub format: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            chunk_size: default_chunk_size(),
            format: default_sample_format(),
        }
    }
}

/// Parameters forwarded to the transcription API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    /// ISO-639-1 language code of the expected speech.
    #[serde(default = "default_language")]
    pub language: String,
    /// Model identifier sent to the API.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature (0.0 – 1.0). Lower = more deterministic.
    #[serde(default)]
    pub temperature: f64,
    /// Optional context prompt prepended to the request.
    #[serde(default)]
    pub prompt: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            model: default_model(),
            temperature: 0.0,
            prompt: String::new(),
        }
    }
}

/// Window geometry and theme, owned by the GUI shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Main window geometry as `"WIDTHxHEIGHT"`.
    #[serde(default = "default_window_geometry")]
    pub window_geometry: String,
    /// Theme name.
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_geometry: default_window_geometry(),
            theme: default_theme(),
        }
    }
}

/// Where and whether transcripts are written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Save each transcript automatically after transcription.
    #[serde(default)]
    pub auto_save: bool,
    /// Directory transcripts are saved into.
    #[serde(default = "default_save_directory")]
    pub save_directory: String,
    /// File extension for saved transcripts.
    #[serde(default = "default_file_format")]
    pub file_format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            auto_save: false,
            save_directory: default_save_directory(),
            file_format: default_file_format(),
        }
    }
}

// ── Serde default functions ─────────────────────────────────────────

fn default_sample_rate() -> u32 {
    44_100
}

fn default_channels() -> u16 {
    1
}

fn default_chunk_size() -> u32 {
    1024
}

fn default_sample_format() -> String {
    "int16".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_model() -> String {
    "whisper-1".to_string()
}

fn default_window_geometry() -> String {
    "600x500".to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_save_directory() -> String {
    dirs::home_dir()
        .map(|home| home.join("Documents"))
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .into_owned()
}

fn default_file_format() -> String {
    "txt".to_string()
}

/// The full default schema as a JSON object tree.
///
/// `api_key` holds either an empty string or an encrypted token, never
/// plaintext; it defaults to "no credential".
#[must_use]
pub fn default_document() -> Map<String, Value> {
    let doc = json!({
        "api_key": "",
        "audio": AudioSettings::default(),
        "transcription": TranscriptionSettings::default(),
        "ui": UiSettings::default(),
        "output": OutputSettings::default(),
    });
    let Value::Object(map) = doc else {
        unreachable!("default schema is a JSON object");
    };
    map
}
