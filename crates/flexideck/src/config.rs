//! # Preferences
//!
//! User preferences are managed by [`confique`], which layers compiled defaults, a
//! TOML file and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Values are resolved in priority order:
//! 1. **Environment variables**: `FLEXIDECK_CARD_TEXT_SIZE`, `FLEXIDECK_SELECTED_VOICE_ID`, etc.
//! 2. **Preferences file**: `preferences.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `new_decks_default_to_2_sided` | `true` | Sidedness given to new decks' cards |
//! | `show_settings_when_creating` | `true` | Open settings right after creating a deck or card |
//! | `use_file_name_as_deck_name` | `false` | Name imported decks after their file |
//! | `card_text_size` | `14.0` | Card text size in points |
//! | `card_date_time_display` | `date-only` | `date-only` or `date-and-time` in card lists |
//! | `show_number_of_sides` | `false` | Show "1-sided"/"2-sided" in card lists |
//! | `card_sort_mode` | `title-ascending` | Last chosen card sort |
//! | `selected_voice_id` | none | Voice for reading cards aloud |
//! | `speak_on_selection_or_flip` | `false` | Read a card aloud when it is selected or flipped |
//!
//! Keys may also be written with dashes (`card-text-size`).

use crate::error::{DeckError, Result};
use crate::model::Sides;
use crate::query::SortMode;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateTimeDisplay {
    #[default]
    DateOnly,
    DateAndTime,
}

impl DateTimeDisplay {
    pub fn as_str(self) -> &'static str {
        match self {
            DateTimeDisplay::DateOnly => "date-only",
            DateTimeDisplay::DateAndTime => "date-and-time",
        }
    }
}

impl FromStr for DateTimeDisplay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "date-only" => Ok(DateTimeDisplay::DateOnly),
            "date-and-time" => Ok(DateTimeDisplay::DateAndTime),
            other => Err(format!("Unknown date/time display: {}", other)),
        }
    }
}

/// User preferences, stored in `preferences.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    #[config(default = true, env = "FLEXIDECK_NEW_DECKS_DEFAULT_TO_2_SIDED")]
    pub new_decks_default_to_2_sided: bool,

    #[config(default = true, env = "FLEXIDECK_SHOW_SETTINGS_WHEN_CREATING")]
    pub show_settings_when_creating: bool,

    #[config(default = false, env = "FLEXIDECK_USE_FILE_NAME_AS_DECK_NAME")]
    pub use_file_name_as_deck_name: bool,

    #[config(default = 14.0, env = "FLEXIDECK_CARD_TEXT_SIZE")]
    pub card_text_size: f64,

    #[config(default = "date-only")]
    pub card_date_time_display: DateTimeDisplay,

    #[config(default = false, env = "FLEXIDECK_SHOW_NUMBER_OF_SIDES")]
    pub show_number_of_sides: bool,

    #[config(default = "title-ascending")]
    pub card_sort_mode: SortMode,

    #[config(env = "FLEXIDECK_SELECTED_VOICE_ID")]
    pub selected_voice_id: Option<String>,

    #[config(default = false, env = "FLEXIDECK_SPEAK_ON_SELECTION_OR_FLIP")]
    pub speak_on_selection_or_flip: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            new_decks_default_to_2_sided: true,
            show_settings_when_creating: true,
            use_file_name_as_deck_name: false,
            card_text_size: 14.0,
            card_date_time_display: DateTimeDisplay::DateOnly,
            show_number_of_sides: false,
            card_sort_mode: SortMode::TitleAscending,
            selected_voice_id: None,
            speak_on_selection_or_flip: false,
        }
    }
}

impl Preferences {
    /// Load preferences from the given directory. A missing file yields defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        Preferences::builder()
            .env()
            .file(dir.join(PREFERENCES_FILE))
            .load()
            .map_err(|e| DeckError::Config(e.to_string()))
    }

    /// Save preferences to the given directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(DeckError::Io)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| DeckError::Config(e.to_string()))?;

        let tmp = dir.join(format!(".preferences-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(DeckError::Io)?;
        fs::rename(&tmp, dir.join(PREFERENCES_FILE)).map_err(DeckError::Io)?;
        Ok(())
    }

    /// Sidedness for a newly created deck.
    pub fn new_deck_sides(&self) -> Sides {
        Sides::from_two_sided(self.new_decks_default_to_2_sided)
    }

    /// Current value of a slot, formatted as text. An unset voice reads as empty.
    pub fn get(&self, key: PrefKey) -> String {
        match key {
            PrefKey::NewDecksDefaultTo2Sided => self.new_decks_default_to_2_sided.to_string(),
            PrefKey::ShowSettingsWhenCreating => self.show_settings_when_creating.to_string(),
            PrefKey::UseFileNameAsDeckName => self.use_file_name_as_deck_name.to_string(),
            PrefKey::CardTextSize => self.card_text_size.to_string(),
            PrefKey::CardDateTimeDisplay => self.card_date_time_display.as_str().to_string(),
            PrefKey::ShowNumberOfSides => self.show_number_of_sides.to_string(),
            PrefKey::CardSortMode => self.card_sort_mode.to_string(),
            PrefKey::SelectedVoiceId => self.selected_voice_id.clone().unwrap_or_default(),
            PrefKey::SpeakOnSelectionOrFlip => self.speak_on_selection_or_flip.to_string(),
        }
    }

    /// Parses `value` into a slot. The preferences are unchanged on error.
    pub fn set(&mut self, key: PrefKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            PrefKey::NewDecksDefaultTo2Sided => {
                self.new_decks_default_to_2_sided = parse_bool(key, value)?
            }
            PrefKey::ShowSettingsWhenCreating => {
                self.show_settings_when_creating = parse_bool(key, value)?
            }
            PrefKey::UseFileNameAsDeckName => {
                self.use_file_name_as_deck_name = parse_bool(key, value)?
            }
            PrefKey::CardTextSize => {
                let size: f64 = value.parse().map_err(|_| invalid(key, value))?;
                if !size.is_finite() || size <= 0.0 {
                    return Err(invalid(key, value));
                }
                self.card_text_size = size;
            }
            PrefKey::CardDateTimeDisplay => {
                self.card_date_time_display = value.parse().map_err(DeckError::Config)?
            }
            PrefKey::ShowNumberOfSides => self.show_number_of_sides = parse_bool(key, value)?,
            PrefKey::CardSortMode => self.card_sort_mode = value.parse().map_err(DeckError::Config)?,
            PrefKey::SelectedVoiceId => {
                self.selected_voice_id = (!value.is_empty()).then(|| value.to_string())
            }
            PrefKey::SpeakOnSelectionOrFlip => {
                self.speak_on_selection_or_flip = parse_bool(key, value)?
            }
        }
        Ok(())
    }
}

fn invalid(key: PrefKey, value: &str) -> DeckError {
    DeckError::Config(format!("Invalid value for {}: {}", key, value))
}

fn parse_bool(key: PrefKey, value: &str) -> Result<bool> {
    value.parse().map_err(|_| invalid(key, value))
}

/// Names of the preference slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    NewDecksDefaultTo2Sided,
    ShowSettingsWhenCreating,
    UseFileNameAsDeckName,
    CardTextSize,
    CardDateTimeDisplay,
    ShowNumberOfSides,
    CardSortMode,
    SelectedVoiceId,
    SpeakOnSelectionOrFlip,
}

impl PrefKey {
    pub const ALL: [PrefKey; 9] = [
        PrefKey::NewDecksDefaultTo2Sided,
        PrefKey::ShowSettingsWhenCreating,
        PrefKey::UseFileNameAsDeckName,
        PrefKey::CardTextSize,
        PrefKey::CardDateTimeDisplay,
        PrefKey::ShowNumberOfSides,
        PrefKey::CardSortMode,
        PrefKey::SelectedVoiceId,
        PrefKey::SpeakOnSelectionOrFlip,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrefKey::NewDecksDefaultTo2Sided => "new_decks_default_to_2_sided",
            PrefKey::ShowSettingsWhenCreating => "show_settings_when_creating",
            PrefKey::UseFileNameAsDeckName => "use_file_name_as_deck_name",
            PrefKey::CardTextSize => "card_text_size",
            PrefKey::CardDateTimeDisplay => "card_date_time_display",
            PrefKey::ShowNumberOfSides => "show_number_of_sides",
            PrefKey::CardSortMode => "card_sort_mode",
            PrefKey::SelectedVoiceId => "selected_voice_id",
            PrefKey::SpeakOnSelectionOrFlip => "speak_on_selection_or_flip",
        }
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefKey {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('-', "_");
        PrefKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| DeckError::Config(format!("Unknown preference key: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert!(prefs.new_decks_default_to_2_sided);
        assert_eq!(prefs.new_deck_sides(), Sides::Two);
        assert!(!prefs.use_file_name_as_deck_name);
        assert_eq!(prefs.card_text_size, 14.0);
        assert_eq!(prefs.card_sort_mode, SortMode::TitleAscending);
        assert_eq!(prefs.selected_voice_id, None);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let prefs = Preferences::load(temp.path()).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested");

        let mut prefs = Preferences::default();
        prefs.set(PrefKey::CardSortMode, "rating-descending").unwrap();
        prefs.set(PrefKey::SelectedVoiceId, "com.voice.alex").unwrap();
        prefs.set(PrefKey::CardDateTimeDisplay, "date-and-time").unwrap();
        prefs.save(&dir).unwrap();

        let loaded = Preferences::load(&dir).unwrap();
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.card_sort_mode, SortMode::RatingDescending);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(PREFERENCES_FILE),
            "use_file_name_as_deck_name = true\n",
        )
        .unwrap();

        let prefs = Preferences::load(temp.path()).unwrap();
        assert!(prefs.use_file_name_as_deck_name);
        assert!(prefs.show_settings_when_creating);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(PREFERENCES_FILE), "card_text_size = \"huge\"\n").unwrap();
        assert!(matches!(
            Preferences::load(temp.path()),
            Err(DeckError::Config(_))
        ));
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut prefs = Preferences::default();
        for key in PrefKey::ALL {
            let current = prefs.get(key);
            prefs.set(key, &current).unwrap();
        }
        assert_eq!(prefs, Preferences::default());

        prefs.set(PrefKey::ShowNumberOfSides, "true").unwrap();
        assert_eq!(prefs.get(PrefKey::ShowNumberOfSides), "true");
        prefs.set(PrefKey::CardTextSize, "18.5").unwrap();
        assert_eq!(prefs.card_text_size, 18.5);
        prefs.set(PrefKey::SelectedVoiceId, "").unwrap();
        assert_eq!(prefs.selected_voice_id, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut prefs = Preferences::default();
        assert!(prefs.set(PrefKey::ShowNumberOfSides, "maybe").is_err());
        assert!(prefs.set(PrefKey::CardTextSize, "-3").is_err());
        assert!(prefs.set(PrefKey::CardSortMode, "sideways").is_err());
        assert!(prefs.set(PrefKey::CardDateTimeDisplay, "never").is_err());
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_key_names() {
        for key in PrefKey::ALL {
            assert_eq!(key.as_str().parse::<PrefKey>().unwrap(), key);
        }
        assert_eq!(
            "card-text-size".parse::<PrefKey>().unwrap(),
            PrefKey::CardTextSize
        );
        assert!("volume".parse::<PrefKey>().is_err());
    }
}
