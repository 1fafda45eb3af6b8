//! Resource locations and audio settings resolved from the command line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loader::Source;
use crate::state::SheetKind;

pub const DEFAULT_RESOURCES: &str = "resources";
pub const MOVES_CSV: &str = "move-sheet.csv";
pub const ABILITIES_CSV: &str = "abilities-sheet.csv";
pub const SCROLL_SFX: &str = "audio/scroll-sound.wav";
pub const IMAGES_DIR: &str = "images";
pub const DEFAULT_VOLUME: f32 = 0.6;
pub const DEFAULT_LOG_FILE: &str = "movesheet.log";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub source: Source,
    pub volume: f32,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub moves: Source,
    pub abilities: Source,
    /// Directory or URL prefix holding `types/` and `categories/` icons.
    pub images_base: String,
    pub sound: SoundSettings,
    pub start_sheet: SheetKind,
}

impl Settings {
    /// Default layout under `resources`, or under `base_url` when given.
    pub fn locate(resources: &Path, base_url: Option<&str>) -> Self {
        let images_base = match base_url {
            Some(base) => format!("{}/{IMAGES_DIR}", base.trim_end_matches('/')),
            None => resources.join(IMAGES_DIR).display().to_string(),
        };
        Self {
            moves: Source::resolve(base_url, resources, MOVES_CSV),
            abilities: Source::resolve(base_url, resources, ABILITIES_CSV),
            images_base,
            sound: SoundSettings {
                source: Source::resolve(base_url, resources, SCROLL_SFX),
                volume: DEFAULT_VOLUME,
                enabled: true,
            },
            start_sheet: SheetKind::Moves,
        }
    }

    pub fn with_moves(mut self, location: Option<&str>) -> Self {
        if let Some(location) = location {
            self.moves = Source::parse(location);
        }
        self
    }

    pub fn with_abilities(mut self, location: Option<&str>) -> Self {
        if let Some(location) = location {
            self.abilities = Source::parse(location);
        }
        self
    }

    /// Volume is clamped to `0.0..=1.0`; `muted` disables the tick entirely.
    pub fn with_sound(mut self, volume: f32, muted: bool) -> Self {
        self.sound.volume = volume.clamp(0.0, 1.0);
        self.sound.enabled = !muted && self.sound.volume > 0.0;
        self
    }

    pub fn with_start_sheet(mut self, sheet: SheetKind) -> Self {
        self.start_sheet = sheet;
        self
    }

    pub fn source_for(&self, sheet: SheetKind) -> &Source {
        match sheet {
            SheetKind::Moves => &self.moves,
            SheetKind::Abilities => &self.abilities,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::locate(Path::new(DEFAULT_RESOURCES), None)
    }
}
