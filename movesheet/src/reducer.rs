use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::loader::Source;
use crate::state::{AppState, LoadOrigin, LoadStatus, SheetKind};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.message = None;
            let moves = state.settings.moves.clone();
            let abilities = state.settings.abilities.clone();
            DispatchResult::changed_with_many(vec![
                begin_load(state, SheetKind::Moves, moves, LoadOrigin::Auto),
                begin_load(state, SheetKind::Abilities, abilities, LoadOrigin::Auto),
            ])
        }

        Action::MovesDidLoad {
            origin,
            source,
            moves,
        } => {
            state.moves.records = moves;
            state.moves.status = LoadStatus::Loaded { source };
            state.rebuild_moves();
            finish_load(state, SheetKind::Moves, origin);
            DispatchResult::changed()
        }

        Action::MovesDidError { origin, error } => {
            fail_load(state, SheetKind::Moves, origin, error);
            DispatchResult::changed()
        }

        Action::AbilitiesDidLoad {
            origin,
            source,
            abilities,
        } => {
            state.abilities.records = abilities;
            state.abilities.status = LoadStatus::Loaded { source };
            state.rebuild_abilities();
            finish_load(state, SheetKind::Abilities, origin);
            DispatchResult::changed()
        }

        Action::AbilitiesDidError { origin, error } => {
            fail_load(state, SheetKind::Abilities, origin, error);
            DispatchResult::changed()
        }

        Action::SheetToggle => {
            state.message = None;
            state.sheet = state.sheet.toggle();
            DispatchResult::changed()
        }

        Action::SheetSet(sheet) => {
            if state.sheet == sheet {
                return DispatchResult::unchanged();
            }
            state.message = None;
            state.sheet = sheet;
            DispatchResult::changed()
        }

        Action::FilterSet(filter) => {
            state.message = None;
            state.filter = filter;
            state.rebuild_moves();
            DispatchResult::changed()
        }

        Action::FilterNext => {
            state.message = None;
            state.filter = state.filter.cycle(1);
            state.rebuild_moves();
            DispatchResult::changed()
        }

        Action::FilterPrev => {
            state.message = None;
            state.filter = state.filter.cycle(-1);
            state.rebuild_moves();
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let moved = state.move_selection(delta as isize);
            selection_result(state, moved)
        }

        Action::SelectionPage(delta) => {
            let page = state.list_page_size() as isize;
            let moved = state.move_selection(delta as isize * page);
            selection_result(state, moved)
        }

        Action::SelectionJumpTop => {
            let moved = state.set_selected(0);
            selection_result(state, moved)
        }

        Action::SelectionJumpBottom => {
            let last = state.visible_len().saturating_sub(1);
            let moved = state.set_selected(last);
            selection_result(state, moved)
        }

        Action::EntrySelect(position) => {
            let moved = state.set_selected(position);
            selection_result(state, moved)
        }

        Action::PickerOpen => {
            state.message = None;
            state.picker.open = true;
            state.picker.path.clear();
            state.picker.target = state.sheet;
            state.picker.error = None;
            DispatchResult::changed()
        }

        Action::PickerClose => {
            state.picker.open = false;
            state.picker.path.clear();
            state.picker.error = None;
            DispatchResult::changed()
        }

        Action::PickerInput(path) => {
            state.picker.path = path;
            state.picker.error = None;
            DispatchResult::changed()
        }

        Action::PickerSubmit(path) => {
            let path = path.trim().to_string();
            if path.is_empty() {
                state.picker.error = Some("Enter a path to a CSV file.".to_string());
                return DispatchResult::changed();
            }
            let target = state.picker.target;
            state.picker.open = false;
            state.picker.path.clear();
            state.picker.error = None;
            state.sheet = target;
            DispatchResult::changed_with(begin_load(
                state,
                target,
                Source::parse(&path),
                LoadOrigin::Picked,
            ))
        }

        Action::SoundDidPlay | Action::SoundDidError(_) => DispatchResult::unchanged(),

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn begin_load(state: &mut AppState, sheet: SheetKind, source: Source, origin: LoadOrigin) -> Effect {
    *state.status_mut(sheet) = LoadStatus::Loading {
        origin,
        source: source.file_name(),
    };
    match sheet {
        SheetKind::Moves => Effect::LoadMoves { source, origin },
        SheetKind::Abilities => Effect::LoadAbilities { source, origin },
    }
}

fn finish_load(state: &mut AppState, sheet: SheetKind, origin: LoadOrigin) {
    if origin == LoadOrigin::Picked {
        state.message = Some(format!("Loaded {}.", sheet.noun()));
    }
}

fn fail_load(state: &mut AppState, sheet: SheetKind, origin: LoadOrigin, error: String) {
    match sheet {
        SheetKind::Moves => state.moves.clear(),
        SheetKind::Abilities => state.abilities.clear(),
    }
    match origin {
        LoadOrigin::Auto => {
            *state.status_mut(sheet) = LoadStatus::AutoLoadFailed { error };
            state.message = Some(format!(
                "Could not auto-load {}. Press o to open a CSV.",
                sheet.noun()
            ));
            if state.sheet == sheet && !state.picker.open {
                state.picker.open = true;
                state.picker.path.clear();
                state.picker.target = sheet;
                state.picker.error = None;
            }
        }
        LoadOrigin::Picked => {
            *state.status_mut(sheet) = LoadStatus::ReadFailed { error };
            state.message = Some(format!("Could not load {}.", sheet.noun()));
        }
    }
}

fn selection_result(state: &mut AppState, moved: bool) -> DispatchResult<Effect> {
    if !moved {
        return DispatchResult::unchanged();
    }
    state.message = None;
    let sound = &state.settings.sound;
    if sound.enabled {
        DispatchResult::changed_with(Effect::PlayScrollTick {
            source: sound.source.clone(),
            volume: sound.volume,
        })
    } else {
        DispatchResult::changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MoveFilter;
    use crate::schema::{AbilityRecord, MoveRecord};

    fn mv(name: &str, level: &str) -> MoveRecord {
        MoveRecord {
            attack: name.into(),
            level: level.into(),
            ..Default::default()
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        reducer(
            &mut state,
            Action::MovesDidLoad {
                origin: LoadOrigin::Auto,
                source: "move-sheet.csv".into(),
                moves: vec![mv("Fireball", "Lv. 3"), mv("Tackle", ""), mv("Light", "Cantrip")],
            },
        );
        state
    }

    #[test]
    fn init_loads_both_sheets() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert_eq!(result.effects.len(), 2);
        assert!(matches!(
            result.effects[0],
            Effect::LoadMoves {
                origin: LoadOrigin::Auto,
                ..
            }
        ));
        assert!(matches!(result.effects[1], Effect::LoadAbilities { .. }));
        assert!(state.moves.status.is_loading());
        assert!(state.abilities.status.is_loading());
    }

    #[test]
    fn load_applies_current_filter_and_selects_first() {
        let mut state = AppState {
            filter: MoveFilter::Attack,
            ..Default::default()
        };
        reducer(
            &mut state,
            Action::MovesDidLoad {
                origin: LoadOrigin::Auto,
                source: "move-sheet.csv".into(),
                moves: vec![mv("Fireball", "Lv. 3"), mv("Tackle", "")],
            },
        );
        assert!(state.moves.status.is_loaded());
        assert_eq!(state.moves.visible, vec![1]);
        assert_eq!(state.moves.selected, Some(0));
        assert_eq!(
            state.moves.selected_record().map(|m| m.attack.as_str()),
            Some("Tackle")
        );
    }

    #[test]
    fn filter_with_no_matches_clears_selection() {
        let mut state = loaded_state();
        let result = reducer(&mut state, Action::FilterSet(MoveFilter::Level(9)));
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(state.moves.visible.is_empty());
        assert_eq!(state.moves.selected, None);
    }

    #[test]
    fn filter_cycle_resets_to_first_match() {
        let mut state = loaded_state();
        reducer(&mut state, Action::SelectionMove(2));
        assert_eq!(state.moves.selected, Some(2));

        reducer(&mut state, Action::FilterNext);
        assert_eq!(state.filter, MoveFilter::Attack);
        assert_eq!(state.moves.selected, Some(0));

        reducer(&mut state, Action::FilterPrev);
        reducer(&mut state, Action::FilterPrev);
        assert_eq!(state.filter, MoveFilter::Level(9));
    }

    #[test]
    fn navigation_plays_tick_only_when_selection_moves() {
        let mut state = loaded_state();

        let result = reducer(&mut state, Action::SelectionMove(1));
        assert!(result.changed);
        assert!(matches!(result.effects[0], Effect::PlayScrollTick { .. }));

        let result = reducer(&mut state, Action::SelectionJumpBottom);
        assert_eq!(state.moves.selected, Some(2));
        assert_eq!(result.effects.len(), 1);

        let result = reducer(&mut state, Action::SelectionMove(1));
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn muted_navigation_is_silent() {
        let mut state = loaded_state();
        state.settings.sound.enabled = false;
        let result = reducer(&mut state, Action::EntrySelect(1));
        assert!(result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn load_message_clears_on_navigation() {
        let mut state = AppState::default();
        reducer(
            &mut state,
            Action::MovesDidLoad {
                origin: LoadOrigin::Picked,
                source: "custom.csv".into(),
                moves: vec![mv("Fireball", "Lv. 3"), mv("Tackle", "")],
            },
        );
        assert_eq!(state.message.as_deref(), Some("Loaded moves."));
        reducer(&mut state, Action::FilterSet(MoveFilter::Level(3)));
        assert_eq!(state.message, None);

        reducer(
            &mut state,
            Action::MovesDidError {
                origin: LoadOrigin::Auto,
                error: "not found".into(),
            },
        );
        reducer(&mut state, Action::PickerClose);
        assert!(state.message.is_some());
        reducer(&mut state, Action::SheetSet(SheetKind::Abilities));
        assert_eq!(state.message, None);

        state.message = Some("Loaded abilities.".into());
        reducer(&mut state, Action::SheetToggle);
        assert_eq!(state.message, None);

        state.message = Some("Loaded moves.".into());
        reducer(&mut state, Action::PickerOpen);
        assert_eq!(state.message, None);
    }

    #[test]
    fn selection_move_clears_message_only_when_moved() {
        let mut state = loaded_state();
        state.message = Some("Loaded moves.".into());
        reducer(&mut state, Action::SelectionJumpTop);
        assert!(state.message.is_some());
        reducer(&mut state, Action::SelectionMove(1));
        assert_eq!(state.message, None);
    }

    #[test]
    fn auto_load_failure_opens_picker() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::MovesDidError {
                origin: LoadOrigin::Auto,
                error: "not found".into(),
            },
        );
        assert!(matches!(state.moves.status, LoadStatus::AutoLoadFailed { .. }));
        assert!(state.picker.open);
        assert_eq!(state.picker.target, SheetKind::Moves);

        // The inactive sheet fails quietly.
        reducer(
            &mut state,
            Action::AbilitiesDidError {
                origin: LoadOrigin::Auto,
                error: "not found".into(),
            },
        );
        assert_eq!(state.picker.target, SheetKind::Moves);
        assert_eq!(state.abilities.status.error(), Some("not found"));
    }

    #[test]
    fn picked_load_failure_clears_table() {
        let mut state = loaded_state();
        reducer(&mut state, Action::PickerOpen);
        let result = reducer(&mut state, Action::PickerSubmit(" broken.csv ".into()));
        assert!(!state.picker.open);
        assert_eq!(
            result.effects,
            vec![Effect::LoadMoves {
                source: Source::parse("broken.csv"),
                origin: LoadOrigin::Picked,
            }]
        );

        reducer(
            &mut state,
            Action::MovesDidError {
                origin: LoadOrigin::Picked,
                error: "bad".into(),
            },
        );
        assert!(matches!(state.moves.status, LoadStatus::ReadFailed { .. }));
        assert!(state.moves.records.is_empty());
        assert_eq!(state.moves.selected, None);
        assert_eq!(state.message.as_deref(), Some("Could not load moves."));
        assert!(!state.picker.open);
    }

    #[test]
    fn empty_picker_submit_is_rejected() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PickerOpen);
        let result = reducer(&mut state, Action::PickerSubmit("   ".into()));
        assert!(result.effects.is_empty());
        assert!(state.picker.open);
        assert!(state.picker.error.is_some());
    }

    #[test]
    fn picker_targets_active_sheet() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SheetToggle);
        reducer(&mut state, Action::PickerOpen);
        let result = reducer(&mut state, Action::PickerSubmit("abilities.csv".into()));
        assert!(matches!(
            result.effects[0],
            Effect::LoadAbilities {
                origin: LoadOrigin::Picked,
                ..
            }
        ));

        reducer(
            &mut state,
            Action::AbilitiesDidLoad {
                origin: LoadOrigin::Picked,
                source: "abilities.csv".into(),
                abilities: vec![AbilityRecord {
                    ability: "Blaze".into(),
                    description: "Fire up".into(),
                }],
            },
        );
        assert_eq!(state.abilities.selected, Some(0));
        assert_eq!(state.message.as_deref(), Some("Loaded abilities."));
    }

    #[test]
    fn sheet_toggle_keeps_each_selection() {
        let mut state = loaded_state();
        reducer(&mut state, Action::SelectionMove(1));
        reducer(&mut state, Action::SheetToggle);
        assert_eq!(state.sheet, SheetKind::Abilities);
        assert!(!reducer(&mut state, Action::SelectionMove(1)).changed);
        reducer(&mut state, Action::SheetToggle);
        assert_eq!(state.moves.selected, Some(1));
        assert!(!reducer(&mut state, Action::SheetSet(SheetKind::Moves)).changed);
    }

    #[test]
    fn terminal_resize_only_changes_on_new_size() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::UiTerminalResize(80, 24)).changed);
        assert!(reducer(&mut state, Action::UiTerminalResize(120, 40)).changed);
        assert_eq!(state.list_page_size(), 28);
    }
}
