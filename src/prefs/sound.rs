//! Persisted sound and music toggles.
//!
//! Settings are read once when loaded and written back after every change.
//! Storage failures never reach the caller: a missing or unreadable entry
//! falls back to defaults and a failed write is logged.

use serde::{Deserialize, Serialize};

use super::store::PreferenceStore;
use crate::core::GameError;

/// Fixed storage key.
pub const SOUND_SETTINGS_KEY: &str = "parity-games-sound-settings";

/// Whether effects and music may play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundSettings {
    pub sound: bool,
    pub music: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            sound: true,
            music: true,
        }
    }
}

/// Sound settings bound to a store.
#[derive(Debug)]
pub struct SoundPreferences<S> {
    store: S,
    settings: SoundSettings,
}

impl<S: PreferenceStore> SoundPreferences<S> {
    /// Read settings from `store`, falling back to defaults.
    pub fn load(store: S) -> Self {
        let settings = match Self::read(&store) {
            Ok(Some(settings)) => {
                tracing::info!(?settings, "loaded sound settings");
                settings
            }
            Ok(None) => SoundSettings::default(),
            Err(e) => {
                tracing::warn!("failed to load sound settings: {e}");
                SoundSettings::default()
            }
        };
        Self { store, settings }
    }

    fn read(store: &S) -> Result<Option<SoundSettings>, GameError> {
        let Some(raw) = store.get(SOUND_SETTINGS_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> SoundSettings {
        self.settings
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.settings.sound
    }

    #[must_use]
    pub fn music_enabled(&self) -> bool {
        self.settings.music
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound = enabled;
        self.save();
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.settings.music = enabled;
        self.save();
    }

    /// Flip effects on or off, returning the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.set_sound_enabled(!self.settings.sound);
        self.settings.sound
    }

    /// Flip music on or off, returning the new value.
    pub fn toggle_music(&mut self) -> bool {
        self.set_music_enabled(!self.settings.music);
        self.settings.music
    }

    pub fn set_settings(&mut self, settings: SoundSettings) {
        self.settings = settings;
        self.save();
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn save(&mut self) {
        if let Err(e) = self.write() {
            tracing::warn!("failed to save sound settings: {e}");
        }
    }

    fn write(&mut self) -> Result<(), GameError> {
        let raw = serde_json::to_string(&self.settings)?;
        self.store.set(SOUND_SETTINGS_KEY, &raw)
    }
}
