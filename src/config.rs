use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::face::{AttrValue, ClockTime, StyleAttributes};

pub const DEFAULT_SIDE: u32 = 240;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    /// frame tick rate used while the second hand is shown
    pub fps: Option<u32>,
    /// where each rendered frame is written (binary PPM)
    pub output: Option<PathBuf>,
    /// clear colour around the clock
    pub surface_color: Option<AttrValue>,
    /// stop the clock at HH:MM[:SS] instead of reading the wall clock
    pub at: Option<String>,
    pub display: Option<DisplayConfig>,
    pub style: Option<StyleAttributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "clockface", about = "Analog clock face", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long)]
    pub fps: Option<u32>,
    /// write frames to this PPM file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// render a single frame and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub once: bool,
    /// fixed time HH:MM[:SS]
    #[arg(long)]
    pub at: Option<String>,
    /// 0 = round, 1 = square
    #[arg(long)]
    pub shape: Option<String>,
    #[arg(long, action = ArgAction::Set)]
    pub numbers: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub seconds: Option<bool>,
    #[arg(long)]
    pub dial_color: Option<String>,
    #[arg(long)]
    pub main_color: Option<String>,
    #[arg(long)]
    pub second_hand_color: Option<String>,
    #[arg(long)]
    pub surface_color: Option<String>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;
    Ok((cfg, cli))
}

/// Same as [`load`] for an already parsed command line.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

impl Config {
    pub fn fps(&self) -> u32 {
        self.fps.unwrap_or(crate::pacer::DEFAULT_FPS)
    }

    pub fn style(&self) -> StyleAttributes {
        self.style.clone().unwrap_or_default()
    }

    /// Configured width/height, either possibly unset.
    pub fn dimensions(&self) -> (Option<u32>, Option<u32>) {
        match self.display.as_ref() {
            Some(d) => (d.width, d.height),
            None => (None, None),
        }
    }

    pub fn fixed_time(&self) -> Option<ClockTime> {
        self.at.as_deref().and_then(ClockTime::parse)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/clockface/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/clockface/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/clockface.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["clockface.yaml", "config.yaml", "config/clockface.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    // an empty file is a valid, empty config
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(s)?)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()     { dst.log_level = src.log_level; }
    if src.fps.is_some()           { dst.fps = src.fps; }
    if src.output.is_some()        { dst.output = src.output; }
    if src.surface_color.is_some() { dst.surface_color = src.surface_color; }
    if src.at.is_some()            { dst.at = src.at; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => {
            if s.width.is_some()  { d.width = s.width; }
            if s.height.is_some() { d.height = s.height; }
        }
        _ => {}
    }
    match (&mut dst.style, src.style) {
        (None, Some(s)) => dst.style = Some(s),
        (Some(d), Some(s)) => d.merge(s),
        _ => {}
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()     { cfg.log_level = cli.log_level.clone(); }
    if cli.fps.is_some()           { cfg.fps = cli.fps; }
    if cli.output.is_some()        { cfg.output = cli.output.clone(); }
    if cli.at.is_some()            { cfg.at = cli.at.clone(); }
    if let Some(c) = cli.surface_color.as_deref() {
        cfg.surface_color = Some(AttrValue::from(c));
    }

    if cli.width.is_some() || cli.height.is_some() {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.width.is_some()  { display.width = cli.width; }
        if cli.height.is_some() { display.height = cli.height; }
    }

    let overrides = StyleAttributes {
        shape: cli.shape.as_deref().map(AttrValue::from),
        has_numbers: cli.numbers.map(AttrValue::from),
        has_seconds: cli.seconds.map(AttrValue::from),
        dial_color: cli.dial_color.as_deref().map(AttrValue::from),
        main_color: cli.main_color.as_deref().map(AttrValue::from),
        second_hand_color: cli.second_hand_color.as_deref().map(AttrValue::from),
    };
    if overrides != StyleAttributes::default() {
        cfg.style.get_or_insert_with(StyleAttributes::default).merge(overrides);
    }
}

/// Host-level invariants. Style attributes are never validated here: bad
/// values fall back to defaults when the style is resolved.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let (Some(0), _) | (_, Some(0)) = cfg.dimensions() {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    if let Some(fps) = cfg.fps {
        if !(1..=240).contains(&fps) {
            return Err(ConfigError::Validation("fps must be 1..=240".into()));
        }
    }
    if let Some(at) = cfg.at.as_deref() {
        if ClockTime::parse(at).is_none() {
            return Err(ConfigError::Validation(format!("--at expects HH:MM[:SS], got {:?}", at)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
log_level: debug
fps: 24
output: /tmp/clock.ppm
display:
  width: 320
  height: 200
style:
  shape: 1
  hasNumbers: true
  main_color: "#112233"
"##;

    #[test]
    fn test_parse_sample() {
        let cfg = parse_yaml(SAMPLE).unwrap();
        assert_eq!(cfg.fps(), 24);
        assert_eq!(cfg.dimensions(), (Some(320), Some(200)));
        let style = cfg.style();
        assert_eq!(style.shape, Some(AttrValue::Int(1)));
        assert_eq!(style.has_numbers, Some(AttrValue::Bool(true)));
        assert_eq!(style.main_color, Some(AttrValue::from("#112233")));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(parse_yaml("  \n").unwrap(), Config::default());
        assert_eq!(Config::default().fps(), crate::pacer::DEFAULT_FPS);
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let mut cfg = parse_yaml(SAMPLE).unwrap();
        let cli = Cli {
            width: Some(100),
            seconds: Some(true),
            main_color: Some("red".into()),
            ..Default::default()
        };
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.dimensions(), (Some(100), Some(200)));
        let style = cfg.style();
        assert_eq!(style.has_seconds, Some(AttrValue::Bool(true)));
        assert_eq!(style.main_color, Some(AttrValue::from("red")));
        // untouched
        assert_eq!(style.shape, Some(AttrValue::Int(1)));
    }

    #[test]
    fn test_merge_layers() {
        let mut base = parse_yaml(SAMPLE).unwrap();
        let over = parse_yaml("display:\n  height: 50\nstyle:\n  shape: 0\n").unwrap();
        merge(&mut base, over);
        assert_eq!(base.dimensions(), (Some(320), Some(50)));
        assert_eq!(base.style().shape, Some(AttrValue::Int(0)));
        assert_eq!(base.style().has_numbers, Some(AttrValue::Bool(true)));
    }

    #[test]
    fn test_validation() {
        let bad = Config { fps: Some(0), ..Default::default() };
        assert!(matches!(validate(&bad), Err(ConfigError::Validation(_))));

        let bad = Config {
            display: Some(DisplayConfig { width: Some(0), height: None }),
            ..Default::default()
        };
        assert!(validate(&bad).is_err());

        let bad = Config { at: Some("25:99".into()), ..Default::default() };
        assert!(validate(&bad).is_err());

        let good = Config { at: Some("10:08:00".into()), fps: Some(60), ..Default::default() };
        assert!(validate(&good).is_ok());
        assert_eq!(good.fixed_time(), Some(ClockTime::new(10, 8, 0)));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/clockface.yaml")),
            ..Default::default()
        };
        assert!(matches!(load_with(&cli), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_round_trip_dump() {
        let cfg = parse_yaml(SAMPLE).unwrap();
        let dumped = cfg.to_yaml().unwrap();
        assert_eq!(parse_yaml(&dumped).unwrap(), cfg);
    }
}
