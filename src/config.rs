use color_eyre::eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

/// Application configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_question_bank_path")]
    pub question_bank_path: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Fixed seed for quiz shuffles; `None` draws from the OS.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            question_bank_path: default_question_bank_path(),
            output_dir: default_output_dir(),
            shuffle_seed: None,
        }
    }
}

const CONFIG_FILE_PATH: &str = "config/quiz_config.toml";
const DEFAULT_QUESTION_BANK: &str = "MedQA_BERT_tagged.json";
const DEFAULT_OUTPUT_DIR: &str = "output";

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

fn default_question_bank_path() -> PathBuf {
    PathBuf::from(DEFAULT_QUESTION_BANK)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Load configuration from disk. On failure the defaults are installed and the
/// error is returned for the caller to surface.
pub fn initialize() -> Result<()> {
    let (config, outcome) = match load_config_from_path(&config_file_path()) {
        Ok(config) => (config, Ok(())),
        Err(err) => (AppConfig::default(), Err(err)),
    };
    if APP_CONFIG.set(config).is_err() {
        return Err(eyre!("configuration already initialised"));
    }
    outcome
}

/// Current configuration; defaults if [`initialize`] has not run.
pub fn current() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::default)
}

pub fn config_file_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_PATH)
}

fn load_config_from_path(path: &Path) -> Result<AppConfig> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse configuration at {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(err) => Err(eyre!(
            "failed to read configuration at {}: {}",
            path.display(),
            err
        )),
    }
}
