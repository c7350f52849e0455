//! Difficulty tiers, engine tuning constants and the settings the app keeps
//! in localStorage between visits.

use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "puzzle_art_settings";
pub const PIECE_CHOICES: [u32; 6] = [9, 16, 25, 36, 49, 64];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Space kept free around the puzzle region when sizing it.
    pub puzzle_padding: f64,
    /// Share of the padded surface the puzzle region takes.
    pub puzzle_fraction: f64,
    pub max_puzzle_size: f64,
    /// Inset of the scatter rectangle from the surface edges.
    pub scatter_margin: f64,
    /// Extra clearance around the puzzle region kept free of scattered
    /// pieces (easier tier only).
    pub target_clearance: f64,
    pub scatter_attempts: u32,
    pub snap_threshold_easy: f64,
    pub snap_threshold_hard: f64,
    pub hint_duration_ms: u32,
    pub victory_delay_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            puzzle_padding: 40.0,
            puzzle_fraction: 0.6,
            max_puzzle_size: 300.0,
            scatter_margin: 20.0,
            target_clearance: 20.0,
            scatter_attempts: 50,
            snap_threshold_easy: 30.0,
            snap_threshold_hard: 20.0,
            hint_duration_ms: 2000,
            victory_delay_ms: 1000,
        }
    }
}

/// Everything the difficulty tier changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile {
    pub snap_threshold: f64,
    pub show_outline: bool,
    pub avoid_target_on_scatter: bool,
}

impl DifficultyProfile {
    pub fn for_difficulty(difficulty: Difficulty, tuning: &Tuning) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                snap_threshold: tuning.snap_threshold_easy,
                show_outline: true,
                avoid_target_on_scatter: true,
            },
            Difficulty::Hard => Self {
                snap_threshold: tuning.snap_threshold_hard,
                show_outline: false,
                avoid_target_on_scatter: false,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pieces: u32,
    pub difficulty: Difficulty,
    pub tutorial_seen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { pieces: 16, difficulty: Difficulty::Easy, tutorial_seen: false }
    }
}

impl Settings {
    /// Parses stored JSON, falling back to defaults for anything unusable.
    pub fn from_json(raw: &str) -> Self {
        let mut settings: Settings = serde_json::from_str(raw).unwrap_or_default();
        if !PIECE_CHOICES.contains(&settings.pieces) {
            settings.pieces = Settings::default().pieces;
        }
        settings
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(SETTINGS_STORAGE_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = serde_json::to_string(self) {
                    let _ = store.set_item(SETTINGS_STORAGE_KEY, &s);
                }
            }
        }
    }
}
