use crate::core::layout::SheetLayout;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

/// Top-level keys written by `init`; `config --check` compares against these.
pub const CONFIG_KEYS: [&str; 5] = [
    "sheet",
    "staff_branches",
    "work_contents",
    "fallback_content",
    "separator_char",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheet: SheetLayout,
    #[serde(default = "default_staff_branches")]
    pub staff_branches: BTreeMap<String, String>,
    #[serde(default = "default_work_contents")]
    pub work_contents: Vec<String>,
    #[serde(default = "default_fallback_content")]
    pub fallback_content: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

pub(crate) fn default_staff_branches() -> BTreeMap<String, String> {
    [
        ("a.kani", "東京"),
        ("a.murai", "東京"),
        ("d.tajima", "東京"),
        ("h.meguro", "東京"),
        ("h.obata", "大阪"),
        ("h.sato", "東京"),
        ("k.fujita", "大阪"),
        ("k.horio", "大阪"),
        ("k.muraoka", "大阪"),
        ("k.usami", "東京"),
        ("m.maekawa", "大阪"),
        ("m.moriguchi", "大阪"),
        ("m.okawa", "大阪"),
        ("r.tanaka", "大阪"),
        ("s.tawada", "大阪"),
        ("y.hara", "大阪"),
        ("y.nakai", "東京"),
        ("y.nishitani", "大阪"),
        ("yuki.sato", "東京"),
    ]
    .into_iter()
    .map(|(staff, branch)| (staff.to_string(), branch.to_string()))
    .collect()
}

pub(crate) fn default_work_contents() -> Vec<String> {
    [
        "移動",
        "納品試運転",
        "制御部更新",
        "点検",
        "年間保守",
        "訪問修理",
        "引取修理",
        "改造",
        "移設",
        "お客様対応(保証期限内)",
        "お客様対応(受注でない)",
        "社内サポート",
        "修繕",
        "貿易管理",
        "庶務",
        "教育",
        "標準化",
        "検査",
        "組立",
        "手配",
        "設計",
        "その他",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub(crate) fn default_fallback_content() -> String {
    "その他".to_string()
}

pub(crate) fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: SheetLayout::default(),
            staff_branches: default_staff_branches(),
            work_contents: default_work_contents(),
            fallback_content: default_fallback_content(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("kousu")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".kousu")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("kousu.conf")
    }

    /// Resolve an optional `--config` override against the default location.
    pub fn resolve_path(custom: Option<&str>) -> PathBuf {
        match custom {
            Some(p) => crate::utils::path::expand_tilde(p),
            None => Self::config_file(),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad(path.into()))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write the default configuration to `path`, creating parent dirs.
    /// An existing file is left alone unless `overwrite` is set.
    pub fn init_at(path: &Path, overwrite: bool) -> AppResult<bool> {
        if path.exists() && !overwrite {
            return Ok(false);
        }

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        Self::default().save(path)?;
        Ok(true)
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave(path.into()))
    }

    /// Reject configurations the pipeline cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if self.work_contents.is_empty() {
            return Err(AppError::Config("work_contents must not be empty".into()));
        }
        if self.fallback_content.trim().is_empty() {
            return Err(AppError::Config("fallback_content must not be empty".into()));
        }
        self.sheet.resolve()?;
        Ok(())
    }
}
