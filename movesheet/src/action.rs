use serde::{Deserialize, Serialize};

use crate::filter::MoveFilter;
use crate::schema::{AbilityRecord, MoveRecord};
use crate::state::{LoadOrigin, SheetKind};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== Sheet loading =====
    MovesDidLoad {
        origin: LoadOrigin,
        source: String,
        moves: Vec<MoveRecord>,
    },
    MovesDidError {
        origin: LoadOrigin,
        error: String,
    },
    AbilitiesDidLoad {
        origin: LoadOrigin,
        source: String,
        abilities: Vec<AbilityRecord>,
    },
    AbilitiesDidError {
        origin: LoadOrigin,
        error: String,
    },

    // ===== Navigation =====
    SheetToggle,
    SheetSet(SheetKind),
    FilterSet(MoveFilter),
    FilterNext,
    FilterPrev,
    SelectionMove(i16),
    SelectionPage(i16),
    SelectionJumpTop,
    SelectionJumpBottom,
    /// Highlight a position in the visible list.
    EntrySelect(usize),

    // ===== File picker =====
    PickerOpen,
    PickerClose,
    PickerInput(String),
    PickerSubmit(String),

    // ===== Sound =====
    SoundDidPlay,
    SoundDidError(String),

    UiTerminalResize(u16, u16),
    Render,
    Quit,
}
