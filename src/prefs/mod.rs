//! Persisted user preferences.

pub mod store;
pub mod sound;

pub use store::{FileStore, MemoryStore, PreferenceStore};
pub use sound::{SoundPreferences, SoundSettings, SOUND_SETTINGS_KEY};
