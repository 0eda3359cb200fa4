//! Game settings
//!
//! Read at startup: from the page URL query string on web, from the
//! `LANE_BEAT_SETTINGS` environment variable (JSON) natively. Nothing is
//! written back.

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, JudgeRules, MatchPolicy};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Timing preset
    pub difficulty: Difficulty,

    // === Judgment ===
    /// Reset combo when a note expires unhit
    pub reset_combo_on_miss: bool,
    /// Which pending note a press resolves when several qualify
    pub match_policy: MatchPolicy,
    /// Combo interval for the milestone sound (0 = off)
    pub combo_milestone: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Only play music when headphones are detected
    pub require_headphones: bool,
    /// Pause when window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = JudgeRules::default();
        Self {
            difficulty: Difficulty::Medium,

            reset_combo_on_miss: rules.reset_combo_on_miss,
            match_policy: rules.match_policy,
            combo_milestone: rules.combo_milestone,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            require_headphones: true,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Judgment rules for a new session
    pub fn rules(&self) -> JudgeRules {
        JudgeRules {
            match_policy: self.match_policy,
            reset_combo_on_miss: self.reset_combo_on_miss,
            combo_milestone: self.combo_milestone,
        }
    }

    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply decoded `(key, value)` pairs, as read from a URL query string.
    ///
    /// Unknown keys and unparsable values are logged and skipped.
    pub fn apply_pairs<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            let applied = match key {
                "difficulty" => Difficulty::from_str(value).map(|d| self.difficulty = d),
                "reset_combo" => parse_flag(value).map(|b| self.reset_combo_on_miss = b),
                "match" => MatchPolicy::from_str(value).map(|p| self.match_policy = p),
                "milestone" => value.parse().ok().map(|m| self.combo_milestone = m),
                "volume" => parse_volume(value).map(|v| self.master_volume = v),
                "sfx" => parse_volume(value).map(|v| self.sfx_volume = v),
                "music" => parse_volume(value).map(|v| self.music_volume = v),
                "headphones" => parse_flag(value).map(|b| self.require_headphones = b),
                "pause_on_blur" => parse_flag(value).map(|b| self.pause_on_blur = b),
                _ => None,
            };
            if applied.is_none() {
                log::warn!("Ignoring setting {}={:?}", key, value);
            }
        }
    }

    /// Apply a raw query string such as `?difficulty=hard&volume=0.5`.
    ///
    /// Decoding goes through the browser's `URLSearchParams`.
    #[cfg(target_arch = "wasm32")]
    pub fn apply_search(&mut self, search: &str) -> Result<(), wasm_bindgen::JsValue> {
        let params = web_sys::UrlSearchParams::new_with_str(search)?;
        let mut pairs = Vec::new();
        for entry in params.entries() {
            let entry = js_sys::Array::from(&entry?);
            if let (Some(key), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string())
            {
                pairs.push((key, value));
            }
        }
        self.apply_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(())
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut settings = Self::default();
        let search = web_sys::window().and_then(|w| w.location().search().ok());
        if let Some(search) = search {
            if let Err(e) = settings.apply_search(&search) {
                log::warn!("Could not parse query string: {:?}", e);
            }
        }
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Load settings from `LANE_BEAT_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(json) = std::env::var("LANE_BEAT_SETTINGS") else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from LANE_BEAT_SETTINGS");
                settings
            }
            Err(e) => {
                log::warn!("Bad LANE_BEAT_SETTINGS ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" | "" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_volume(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().map(|v| v.clamp(0.0, 1.0))
}
