//! User configuration: scroll tuning, key bindings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio-scroll/config.toml` (default
//! `~/.config/folio-scroll/config.toml`).  Unknown keys are ignored; values
//! that fail to parse are logged and the default is kept.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::coordinator::CoordinatorConfig;
use crate::core::timeline_ball::{BallConfig, Interpolation};

// ───────────────────────────────────────── actions ───────────

/// Rebindable page actions.  Digits (jump to entry N) and Ctrl-c are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    NextEntry,
    PrevEntry,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::NextEntry,
        Action::PrevEntry,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::NextEntry => "next_entry",
            Action::PrevEntry => "prev_entry",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Key code plus CTRL/ALT/SHIFT.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Config-file form, e.g. `Shift+BackTab`, `PageDown`, `j`.
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        match self.code {
            KeyCode::Char(' ') => s.push_str("Space"),
            KeyCode::Char(c) => s.push(c),
            KeyCode::F(n) => s.push_str(&format!("F{n}")),
            code => s.push_str(named_key(code).unwrap_or("?")),
        }
        s
    }

    /// Short form for the status line (arrows as glyphs).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        match self.code {
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            KeyCode::PageUp => s.push_str("PgUp"),
            KeyCode::PageDown => s.push_str("PgDn"),
            KeyCode::BackTab => s.push_str("Tab"),
            _ => return self.to_config_string(),
        }
        s
    }

    fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = parts.pop()?;
        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let lower = key.to_ascii_lowercase();
        let code = match lower.as_str() {
            "space" => KeyCode::Char(' '),
            "return" => KeyCode::Enter,
            "escape" => KeyCode::Esc,
            "pgup" => KeyCode::PageUp,
            "pgdn" => KeyCode::PageDown,
            f if f.len() > 1 && f.starts_with('f') && f[1..].chars().all(|c| c.is_ascii_digit()) => {
                KeyCode::F(f[1..].parse().ok()?)
            }
            _ if key.chars().count() == 1 => {
                let c = key.chars().next()?;
                // Terminals report uppercase letters with SHIFT held.
                if c.is_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                }
                KeyCode::Char(c)
            }
            _ => NAMED_KEYS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, code)| *code)?,
        };
        Some(Self { code, modifiers })
    }
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("BackTab", KeyCode::BackTab),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
];

fn named_key(code: KeyCode) -> Option<&'static str> {
    NAMED_KEYS.iter().find(|(_, c)| *c == code).map(|(name, _)| *name)
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: expected a number, got \"{value}\"")]
    NotANumber { key: String, value: String },
    #[error("{key}: {value} is outside {min}..={max}")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{key}: unknown value \"{value}\"")]
    UnknownValue { key: String, value: String },
    #[error("{key}: no valid key in \"{value}\"")]
    NoBinding { key: String, value: String },
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallModel {
    Lerp,
    Spring,
}

/// Effective settings.  Distances are terminal rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub coordinator: CoordinatorConfig,
    pub ball_model: BallModel,
    pub smooth_factor: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub velocity_threshold: f64,
    pub rest_distance: f64,
    pub sidebar_target_ratio: f64,
    pub sidebar_jitter: f64,
    /// Sidebar entries count as hidden only this far past the edge.
    pub sidebar_hidden_margin: f64,
    pub frame_interval_ms: u64,
    pub wheel_rows: u16,
    /// Fraction of the remaining distance the page covers per frame.
    pub scroll_speed: f64,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            coordinator: CoordinatorConfig {
                navbar_threshold: 2.0,
                scroll_offset: -1.0,
                settle_tolerance: 0.5,
                ..CoordinatorConfig::default()
            },
            ball_model: BallModel::Spring,
            smooth_factor: 0.12,
            stiffness: 200.0,
            damping: 22.0,
            velocity_threshold: 0.5,
            rest_distance: 0.05,
            sidebar_target_ratio: 1.0 / 3.0,
            sidebar_jitter: 1.0,
            sidebar_hidden_margin: 1.0,
            frame_interval_ms: 16,
            wheel_rows: 3,
            scroll_speed: 0.35,
            bindings: Self::default_bindings(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let mut m = HashMap::new();
        m.insert(Action::ScrollUp, vec![KeyBind::plain(Up), KeyBind::plain(Char('k'))]);
        m.insert(Action::ScrollDown, vec![KeyBind::plain(Down), KeyBind::plain(Char('j'))]);
        m.insert(Action::PageUp, vec![KeyBind::plain(PageUp)]);
        m.insert(Action::PageDown, vec![KeyBind::plain(PageDown), KeyBind::plain(Char(' '))]);
        m.insert(Action::Top, vec![KeyBind::plain(Home), KeyBind::plain(Char('g'))]);
        m.insert(Action::Bottom, vec![KeyBind::plain(End), KeyBind::new(Char('G'), KeyModifiers::SHIFT)]);
        m.insert(Action::NextEntry, vec![KeyBind::plain(Tab)]);
        m.insert(Action::PrevEntry, vec![KeyBind::new(BackTab, KeyModifiers::SHIFT)]);
        m.insert(Action::Quit, vec![KeyBind::plain(Char('q')), KeyBind::plain(Esc)]);
        m
    }

    pub fn ball_config(&self) -> BallConfig {
        let interpolation = match self.ball_model {
            BallModel::Lerp => Interpolation::Lerp {
                smooth_factor: self.smooth_factor,
            },
            BallModel::Spring => Interpolation::Spring {
                stiffness: self.stiffness,
                damping: self.damping,
            },
        };
        BallConfig {
            interpolation,
            velocity_threshold: self.velocity_threshold,
            rest_distance: self.rest_distance,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Action bound to `event`.  With overlapping bindings the one carrying
    /// more modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | 1-9/{}: jump | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::NextEntry),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(err) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), %err, "unreadable config; using defaults");
                }
                Self::default()
            }
        }
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();
        for (n, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            if let Err(err) = config.apply(key.trim(), value) {
                tracing::warn!(line = n + 1, %err, "ignoring config entry");
            }
        }
        config
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let c = &mut self.coordinator;
        match key {
            "navbar_threshold" => c.navbar_threshold = number(key, value, 0.0, 1e6)?,
            "focus_point_ratio" => c.focus_point_ratio = number(key, value, 0.0, 1.0)?,
            "scroll_offset" => c.scroll_offset = number(key, value, -1e6, 1e6)?,
            "scroll_end_fallback_ms" => {
                c.scroll_end_fallback = Duration::from_millis(number(key, value, 0.0, 60_000.0)? as u64)
            }
            "settle_tolerance" => c.settle_tolerance = number(key, value, 0.0, 1e6)?,
            "settle_limit_ms" => c.settle_limit = Duration::from_millis(number(key, value, 0.0, 600_000.0)? as u64),
            "skills_bar_anchor" => c.skills_bar_anchor = value.to_string(),
            "skills_bar_ratio" => c.skills_bar_ratio = number(key, value, 0.0, 1.0)?,
            "visibility_margin" => c.visibility_margin = number(key, value, 0.0, 0.5)?,
            "ball_model" => {
                self.ball_model = match value.to_ascii_lowercase().as_str() {
                    "lerp" => BallModel::Lerp,
                    "spring" => BallModel::Spring,
                    _ => {
                        return Err(ConfigError::UnknownValue {
                            key: key.into(),
                            value: value.into(),
                        })
                    }
                }
            }
            "smooth_factor" => self.smooth_factor = number(key, value, 0.001, 1.0)?,
            "stiffness" => self.stiffness = number(key, value, 0.0, 10_000.0)?,
            "damping" => self.damping = number(key, value, 0.0, 1_000.0)?,
            "velocity_threshold" => self.velocity_threshold = number(key, value, 0.0, 1e6)?,
            "rest_distance" => self.rest_distance = number(key, value, 0.0, 1e6)?,
            "sidebar_target_ratio" => self.sidebar_target_ratio = number(key, value, 0.0, 1.0)?,
            "sidebar_jitter" => self.sidebar_jitter = number(key, value, 0.0, 1e3)?,
            "sidebar_hidden_margin" => self.sidebar_hidden_margin = number(key, value, 0.0, 1e3)?,
            "frame_interval_ms" => self.frame_interval_ms = number(key, value, 4.0, 1000.0)? as u64,
            "wheel_rows" => self.wheel_rows = number(key, value, 1.0, 100.0)? as u16,
            "scroll_speed" => self.scroll_speed = number(key, value, 0.05, 1.0)?,
            _ => {
                let Some(action) = Action::from_config_key(key) else {
                    tracing::debug!(key, "unknown config key");
                    return Ok(());
                };
                let binds: Vec<KeyBind> = value.split(',').filter_map(|p| KeyBind::parse(p.trim())).collect();
                if binds.is_empty() {
                    return Err(ConfigError::NoBinding {
                        key: key.into(),
                        value: value.into(),
                    });
                }
                self.bindings.insert(action, binds);
            }
        }
        Ok(())
    }

    pub fn serialise(&self) -> String {
        let c = &self.coordinator;
        let ball_model = match self.ball_model {
            BallModel::Lerp => "lerp",
            BallModel::Spring => "spring",
        };
        let mut lines = vec![
            "# folio-scroll configuration".to_string(),
            "# Distances are in terminal rows.".to_string(),
            String::new(),
            "# Scroll coordinator".to_string(),
            format!("navbar_threshold = {}", c.navbar_threshold),
            format!("focus_point_ratio = {}", c.focus_point_ratio),
            format!("scroll_offset = {}", c.scroll_offset),
            format!("scroll_end_fallback_ms = {}", c.scroll_end_fallback.as_millis()),
            format!("settle_tolerance = {}", c.settle_tolerance),
            format!("settle_limit_ms = {}", c.settle_limit.as_millis()),
            format!("skills_bar_anchor = {}", c.skills_bar_anchor),
            format!("skills_bar_ratio = {}", c.skills_bar_ratio),
            format!("visibility_margin = {}", c.visibility_margin),
            String::new(),
            "# Timeline ball (lerp | spring)".to_string(),
            format!("ball_model = {ball_model}"),
            format!("smooth_factor = {}", self.smooth_factor),
            format!("stiffness = {}", self.stiffness),
            format!("damping = {}", self.damping),
            format!("velocity_threshold = {}", self.velocity_threshold),
            format!("rest_distance = {}", self.rest_distance),
            String::new(),
            "# Sidebar".to_string(),
            format!("sidebar_target_ratio = {}", self.sidebar_target_ratio),
            format!("sidebar_jitter = {}", self.sidebar_jitter),
            format!("sidebar_hidden_margin = {}", self.sidebar_hidden_margin),
            String::new(),
            "# Terminal".to_string(),
            format!("frame_interval_ms = {}", self.frame_interval_ms),
            format!("wheel_rows = {}", self.wheel_rows),
            format!("scroll_speed = {}", self.scroll_speed),
            String::new(),
            "# Key bindings: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+".to_string(),
        ];
        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn number(key: &str, value: &str, min: f64, max: f64) -> Result<f64, ConfigError> {
    let parsed: f64 = value.parse().map_err(|_| ConfigError::NotANumber {
        key: key.into(),
        value: value.into(),
    })?;
    if !(min..=max).contains(&parsed) {
        return Err(ConfigError::OutOfRange {
            key: key.into(),
            value: parsed,
            min,
            max,
        });
    }
    Ok(parsed)
}

/// `$XDG_CONFIG_HOME/folio-scroll/config.toml`.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
