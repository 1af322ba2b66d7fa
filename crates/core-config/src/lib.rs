//! Configuration loading and parsing.
//!
//! Parses `led.toml` (or an override path provided by the binary). Every table
//! and field is optional; anything absent takes the built-in default. A missing
//! file or a parse error yields the defaults, never a startup failure. Unknown
//! fields are ignored.
//!
//! ```toml
//! [font]
//! size = 24
//! step = 4
//!
//! [input]
//! repeat_cooldown = 3
//!
//! [theme]
//! default = 0
//! [[theme.palette]]
//! name = "dark"
//! background = [26, 26, 26]
//! text = [245, 245, 245]
//! hud = [80, 80, 80]
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "led.toml";

/// RGB triple.
pub type Rgb = [u8; 3];

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FontConfig {
    #[serde(default = "FontConfig::default_size")]
    pub size: u16,
    #[serde(default = "FontConfig::default_step")]
    pub step: u16,
    /// Defaults to half of `size`.
    #[serde(default)]
    pub min: Option<u16>,
    /// Defaults to double `size`.
    #[serde(default)]
    pub max: Option<u16>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            step: Self::default_step(),
            min: None,
            max: None,
        }
    }
}

impl FontConfig {
    const fn default_size() -> u16 {
        24
    }
    const fn default_step() -> u16 {
        4
    }

    /// Effective `(min, max)`; inverted bounds are swapped.
    pub fn bounds(&self) -> (u16, u16) {
        let min = self.min.unwrap_or(self.size / 2);
        let max = self.max.unwrap_or(self.size.saturating_mul(2));
        if min <= max { (min, max) } else { (max, min) }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// Accept one of every N auto-repeated key events for repeatable commands.
    #[serde(default = "InputConfig::default_repeat_cooldown")]
    pub repeat_cooldown: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repeat_cooldown: Self::default_repeat_cooldown(),
        }
    }
}

impl InputConfig {
    const fn default_repeat_cooldown() -> u32 {
        3
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Palette {
    pub name: String,
    pub background: Rgb,
    pub text: Rgb,
    pub hud: Rgb,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            background: [26, 26, 26],
            text: [245, 245, 245],
            hud: [80, 80, 80],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".into(),
            background: [245, 245, 245],
            text: [0, 0, 0],
            hud: [130, 130, 130],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    #[serde(default)]
    pub default: usize,
    #[serde(default = "ThemeConfig::default_palette")]
    pub palette: Vec<Palette>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: 0,
            palette: Self::default_palette(),
        }
    }
}

impl ThemeConfig {
    fn default_palette() -> Vec<Palette> {
        vec![Palette::dark(), Palette::light()]
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
    /// Path the values were read from, if any.
    pub source: Option<PathBuf>,
}

/// Best-effort config path: `./led.toml`, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("led").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Palette list with a guaranteed entry.
    pub fn palettes(&self) -> Vec<Palette> {
        if self.file.theme.palette.is_empty() {
            ThemeConfig::default_palette()
        } else {
            self.file.theme.palette.clone()
        }
    }

    /// Starting theme index, reset to 0 when out of range.
    pub fn default_theme(&self) -> usize {
        let idx = self.file.theme.default;
        let count = self.palettes().len();
        if idx < count {
            idx
        } else {
            warn!(target: "config", idx, count, "theme_default_out_of_range");
            0
        }
    }

    /// A cooldown of zero would divide by zero in the throttle.
    pub fn repeat_cooldown(&self) -> u32 {
        self.file.input.repeat_cooldown.max(1)
    }
}
