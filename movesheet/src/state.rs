use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{DebugSection, DebugState, ron_string};

use crate::config::Settings;
use crate::filter::{self, MoveFilter};
use crate::schema::{AbilityRecord, MoveRecord, SheetRecord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    #[default]
    Moves,
    Abilities,
}

impl SheetKind {
    pub fn toggle(&self) -> Self {
        match self {
            SheetKind::Moves => SheetKind::Abilities,
            SheetKind::Abilities => SheetKind::Moves,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SheetKind::Moves => MoveRecord::PLURAL,
            SheetKind::Abilities => AbilityRecord::PLURAL,
        }
    }

    /// Lowercase noun for messages ("moves", "abilities").
    pub fn noun(&self) -> &'static str {
        match self {
            SheetKind::Moves => "moves",
            SheetKind::Abilities => "abilities",
        }
    }
}

/// Who asked for a load: the startup auto-load or the file picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOrigin {
    Auto,
    Picked,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading {
        origin: LoadOrigin,
        source: String,
    },
    Loaded {
        source: String,
    },
    AutoLoadFailed {
        error: String,
    },
    ReadFailed {
        error: String,
    },
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading { .. })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::AutoLoadFailed { error } | LoadStatus::ReadFailed { error } => Some(error),
            _ => None,
        }
    }
}

/// One loaded table plus its visible subset and selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetState<T> {
    pub records: Vec<T>,
    /// Indices into `records`, in table order.
    pub visible: Vec<usize>,
    /// Position within `visible`.
    pub selected: Option<usize>,
    pub status: LoadStatus,
}

impl<T> Default for SheetState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            visible: Vec::new(),
            selected: None,
            status: LoadStatus::Idle,
        }
    }
}

impl<T: SheetRecord> SheetState<T> {
    /// Installs a fresh visible list and highlights its first entry.
    pub fn show(&mut self, visible: Vec<usize>) {
        self.selected = if visible.is_empty() { None } else { Some(0) };
        self.visible = visible;
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.visible.clear();
        self.selected = None;
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().filter_map(|idx| self.records.get(*idx))
    }

    pub fn selected_record(&self) -> Option<&T> {
        let position = self.selected?;
        let idx = *self.visible.get(position)?;
        self.records.get(idx)
    }

    /// Clamps to the visible list; returns whether the selection moved.
    pub fn set_selected(&mut self, position: usize) -> bool {
        if self.visible.is_empty() {
            self.selected = None;
            return false;
        }
        let bounded = position.min(self.visible.len() - 1);
        if self.selected == Some(bounded) {
            return false;
        }
        self.selected = Some(bounded);
        true
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        let current = self.selected.unwrap_or(0) as isize;
        self.set_selected((current + delta).max(0) as usize)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PickerState {
    pub open: bool,
    pub path: String,
    /// Sheet the picked file is loaded into.
    pub target: SheetKind,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub settings: Settings,
    pub sheet: SheetKind,
    pub moves: SheetState<MoveRecord>,
    pub abilities: SheetState<AbilityRecord>,
    pub filter: MoveFilter,
    pub picker: PickerState,
    pub terminal_size: (u16, u16),
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            sheet: settings.start_sheet,
            settings,
            moves: SheetState::default(),
            abilities: SheetState::default(),
            filter: MoveFilter::All,
            picker: PickerState::default(),
            terminal_size: (80, 24),
            message: None,
        }
    }

    pub fn status(&self, sheet: SheetKind) -> &LoadStatus {
        match sheet {
            SheetKind::Moves => &self.moves.status,
            SheetKind::Abilities => &self.abilities.status,
        }
    }

    pub fn status_mut(&mut self, sheet: SheetKind) -> &mut LoadStatus {
        match sheet {
            SheetKind::Moves => &mut self.moves.status,
            SheetKind::Abilities => &mut self.abilities.status,
        }
    }

    pub fn visible_len(&self) -> usize {
        match self.sheet {
            SheetKind::Moves => self.moves.visible.len(),
            SheetKind::Abilities => self.abilities.visible.len(),
        }
    }

    pub fn selected_position(&self) -> Option<usize> {
        match self.sheet {
            SheetKind::Moves => self.moves.selected,
            SheetKind::Abilities => self.abilities.selected,
        }
    }

    /// Selection changes on the active sheet.
    pub fn set_selected(&mut self, position: usize) -> bool {
        match self.sheet {
            SheetKind::Moves => self.moves.set_selected(position),
            SheetKind::Abilities => self.abilities.set_selected(position),
        }
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        match self.sheet {
            SheetKind::Moves => self.moves.move_selection(delta),
            SheetKind::Abilities => self.abilities.move_selection(delta),
        }
    }

    /// Re-applies the current filter and highlights the first match.
    pub fn rebuild_moves(&mut self) {
        let visible = filter::filter_moves(&self.moves.records, self.filter);
        self.moves.show(visible);
    }

    pub fn rebuild_abilities(&mut self) {
        let visible = self
            .abilities
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.has_name())
            .map(|(idx, _)| idx)
            .collect();
        self.abilities.show(visible);
    }

    pub fn list_page_size(&self) -> usize {
        self.terminal_size.1.saturating_sub(12).max(1) as usize
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Moves")
                .entry("status", ron_string(&self.moves.status))
                .entry("total", ron_string(&self.moves.records.len()))
                .entry("visible", ron_string(&self.moves.visible.len()))
                .entry("selected", ron_string(&self.moves.selected))
                .entry("filter", ron_string(&self.filter)),
            DebugSection::new("Abilities")
                .entry("status", ron_string(&self.abilities.status))
                .entry("total", ron_string(&self.abilities.records.len()))
                .entry("selected", ron_string(&self.abilities.selected)),
            DebugSection::new("View")
                .entry("sheet", ron_string(&self.sheet))
                .entry("picker_open", ron_string(&self.picker.open))
                .entry("picker_path", ron_string(&self.picker.path))
                .entry("sound", ron_string(&self.settings.sound.enabled))
                .entry("message", ron_string(&self.message)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(name: &str) -> AbilityRecord {
        AbilityRecord {
            ability: name.into(),
            description: String::new(),
        }
    }

    #[test]
    fn show_selects_first_or_none() {
        let mut sheet: SheetState<AbilityRecord> = SheetState::default();
        sheet.records = vec![ability("Blaze"), ability("Torrent")];
        sheet.show(vec![0, 1]);
        assert_eq!(sheet.selected, Some(0));
        assert_eq!(sheet.selected_record().map(|a| a.ability.as_str()), Some("Blaze"));

        sheet.show(Vec::new());
        assert_eq!(sheet.selected, None);
        assert!(sheet.selected_record().is_none());
    }

    #[test]
    fn selection_is_clamped() {
        let mut sheet: SheetState<AbilityRecord> = SheetState::default();
        sheet.records = vec![ability("a"), ability("b"), ability("c")];
        sheet.show(vec![0, 1, 2]);

        assert!(sheet.set_selected(10));
        assert_eq!(sheet.selected, Some(2));
        assert!(!sheet.set_selected(2));
        assert!(sheet.move_selection(-5));
        assert_eq!(sheet.selected, Some(0));
        assert!(!sheet.move_selection(-1));
    }

    #[test]
    fn rebuild_abilities_skips_blank_names() {
        let mut state = AppState::default();
        state.abilities.records = vec![ability("Blaze"), ability(" "), ability("Torrent")];
        state.rebuild_abilities();
        assert_eq!(state.abilities.visible, vec![0, 2]);
        let names: Vec<&str> = state
            .abilities
            .visible_records()
            .map(|a| a.ability.as_str())
            .collect();
        assert_eq!(names, vec!["Blaze", "Torrent"]);
    }

    #[test]
    fn toggle_sheet() {
        assert_eq!(SheetKind::Moves.toggle(), SheetKind::Abilities);
        assert_eq!(SheetKind::Abilities.toggle(), SheetKind::Moves);
        assert_eq!(SheetKind::Abilities.label(), "ABILITIES");
    }
}
