use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use tui_dispatch::{Component, EventKind, HandlerResponse};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::components::theme::{
    ACCENT_GOLD, ACCENT_RED, BG_BASE, BG_PANEL, TEXT_DIM, TEXT_MAIN, type_color,
};
use crate::components::{
    DetailContent, DetailPanel, DetailPanelProps, EntryList, EntryListProps, FilePicker,
    FilePickerProps, FilterBar, FilterBarProps, Placeholder,
};
use crate::filter;
use crate::schema::{AbilityRecord, MoveRecord, SheetRecord};
use crate::state::{AppState, LoadStatus, SheetKind};

/// Screen regions the event bus routes by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiAreas {
    pub main: Rect,
    pub picker: Option<Rect>,
}

pub struct SheetUi {
    filter_bar: FilterBar,
    entry_list: EntryList,
    detail: DetailPanel,
    picker: FilePicker,
    status_bar: StatusBar,
}

impl Default for SheetUi {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetUi {
    pub fn new() -> Self {
        Self {
            filter_bar: FilterBar,
            entry_list: EntryList::new(),
            detail: DetailPanel,
            picker: FilePicker::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) -> UiAreas {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let filter_height = if state.sheet == SheetKind::Moves { 3 } else { 0 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(filter_height),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        render_header(frame, layout[0], state);
        if state.sheet == SheetKind::Moves {
            self.filter_bar.render(
                frame,
                layout[1],
                FilterBarProps {
                    active: state.filter,
                    is_focused: !state.picker.open,
                },
            );
        }
        self.render_body(frame, layout[2], state);
        self.render_footer(frame, layout[3], state);

        self.picker.set_open(state.picker.open);
        let picker = if state.picker.open {
            let target = state.picker.target;
            let suggestion = state.settings.source_for(target).file_name();
            self.picker.render(
                frame,
                area,
                FilePickerProps {
                    path: &state.picker.path,
                    target: target.label(),
                    suggestion: &suggestion,
                    error: state.picker.error.as_deref(),
                    is_focused: true,
                    on_change: Action::PickerInput,
                    on_submit: Action::PickerSubmit,
                },
            );
            Some(area)
        } else {
            None
        };

        UiAreas {
            main: layout[2],
            picker,
        }
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let items = list_items(state);
        let placeholder = list_placeholder(state);
        self.entry_list.render(
            frame,
            layout[0],
            EntryListProps {
                title: state.sheet.label(),
                items: &items,
                selected: state.selected_position(),
                placeholder: placeholder.as_ref(),
                is_focused: !state.picker.open,
            },
        );
        self.detail.render(
            frame,
            layout[1],
            DetailPanelProps {
                content: detail_content(state),
            },
        );
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = status_hints(state);
        let status = status_text(state);
        let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
        let status_items = [StatusBarItem::span(status_span)];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_RED)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }

    /// Keys for the sheet view: global shortcuts, filter keys, then the list.
    pub fn handle_main_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        if let EventKind::Key(key) = event {
            let global = match key.code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Tab | KeyCode::BackTab => Some(Action::SheetToggle),
                KeyCode::Char('o') => Some(Action::PickerOpen),
                _ => None,
            };
            if let Some(action) = global {
                return handler_response(vec![action]);
            }
        }

        if state.sheet == SheetKind::Moves {
            let actions: Vec<_> = self
                .filter_bar
                .handle_event(
                    event,
                    FilterBarProps {
                        active: state.filter,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
            if !actions.is_empty() {
                return handler_response(actions);
            }
        }

        let items = list_items(state);
        let placeholder = list_placeholder(state);
        let actions: Vec<_> = self
            .entry_list
            .handle_event(
                event,
                EntryListProps {
                    title: state.sheet.label(),
                    items: &items,
                    selected: state.selected_position(),
                    placeholder: placeholder.as_ref(),
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn handle_picker_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        self.picker.set_open(state.picker.open);
        let target = state.picker.target;
        let suggestion = state.settings.source_for(target).file_name();
        let actions: Vec<_> = self
            .picker
            .handle_event(
                event,
                FilePickerProps {
                    path: &state.picker.path,
                    target: target.label(),
                    suggestion: &suggestion,
                    error: state.picker.error.as_deref(),
                    is_focused: true,
                    on_change: Action::PickerInput,
                    on_submit: Action::PickerSubmit,
                },
            )
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("MOVESHEET")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(32)])
        .split(inner);

    let selected = match state.sheet {
        SheetKind::Moves => 0,
        SheetKind::Abilities => 1,
    };
    let tabs = Tabs::new(vec![SheetKind::Moves.label(), SheetKind::Abilities.label()])
        .select(selected)
        .style(Style::default().fg(TEXT_DIM))
        .highlight_style(Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, layout[0]);

    let source = Paragraph::new(Line::from(Span::styled(
        source_label(state.status(state.sheet)),
        Style::default().fg(ACCENT_GOLD),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(source, layout[1]);
}

/// Upper-cased source file name for the header.
pub fn source_label(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Loaded { source } => source.to_uppercase(),
        LoadStatus::Loading { source, .. } => format!("LOADING {}", source.to_uppercase()),
        LoadStatus::Idle | LoadStatus::AutoLoadFailed { .. } | LoadStatus::ReadFailed { .. } => {
            "NO FILE".to_string()
        }
    }
}

pub fn list_items(state: &AppState) -> Vec<Line<'static>> {
    match state.sheet {
        SheetKind::Moves => state.moves.visible_records().map(move_row).collect(),
        SheetKind::Abilities => state.abilities.visible_records().map(ability_row).collect(),
    }
}

fn cell(value: &str, width: usize) -> String {
    let truncated: String = value.trim().chars().take(width).collect();
    format!("{truncated:<pad$}", pad = width + 1)
}

fn or_dash(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { "-" } else { value }
}

pub fn move_row(record: &MoveRecord) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            cell(&record.attack, 20),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(cell(&record.kind, 9), Style::default().fg(type_color(&record.kind))),
        Span::styled(cell(&record.category, 9), Style::default().fg(TEXT_DIM)),
        Span::styled(cell(&filter::level_for_list(record), 8), Style::default().fg(ACCENT_GOLD)),
        Span::styled(
            cell(or_dash(&record.casting_time), 10),
            Style::default().fg(TEXT_DIM),
        ),
        Span::raw(or_dash(&record.mini_description).to_string()),
    ])
}

pub fn ability_row(record: &AbilityRecord) -> Line<'static> {
    Line::from(Span::raw(record.ability.trim().to_string()))
}

/// What the list shows instead of rows, if anything.
pub fn list_placeholder(state: &AppState) -> Option<Placeholder> {
    let sheet = state.sheet;
    let (status, visible_empty, plural) = match sheet {
        SheetKind::Moves => (&state.moves.status, state.moves.visible.is_empty(), MoveRecord::PLURAL),
        SheetKind::Abilities => (
            &state.abilities.status,
            state.abilities.visible.is_empty(),
            AbilityRecord::PLURAL,
        ),
    };
    match status {
        LoadStatus::Idle => Some(Placeholder::new("LOADING", "PLEASE WAIT")),
        LoadStatus::Loading { source, .. } => Some(Placeholder::new(
            format!("LOADING {}", source.to_uppercase()),
            "PLEASE WAIT",
        )),
        LoadStatus::AutoLoadFailed { .. } => Some(Placeholder::new(
            format!("LOAD {}", state.settings.source_for(sheet).file_name()),
            "AUTO-LOAD FAILED",
        )),
        LoadStatus::ReadFailed { .. } => Some(Placeholder::new("FAILED TO READ CSV", "CHECK FORMAT")),
        LoadStatus::Loaded { .. } if visible_empty => {
            let hint = match sheet {
                SheetKind::Moves => "CHECK FILTER / CSV",
                SheetKind::Abilities => "CHECK CSV",
            };
            Some(Placeholder::new(format!("NO {plural}"), hint))
        }
        LoadStatus::Loaded { .. } => None,
    }
}

fn detail_content(state: &AppState) -> DetailContent<'_> {
    let status = state.status(state.sheet);
    match status {
        LoadStatus::Idle | LoadStatus::Loading { .. } => return DetailContent::Empty,
        LoadStatus::AutoLoadFailed { .. } => {
            return DetailContent::Message(match state.sheet {
                SheetKind::Moves => "Could not auto-load moves.",
                SheetKind::Abilities => "Could not auto-load abilities.",
            });
        }
        LoadStatus::ReadFailed { .. } => {
            return DetailContent::Message(match state.sheet {
                SheetKind::Moves => "Could not load moves.",
                SheetKind::Abilities => "Could not load abilities.",
            });
        }
        LoadStatus::Loaded { .. } => {}
    }
    match state.sheet {
        SheetKind::Moves => match state.moves.selected_record() {
            Some(record) => DetailContent::Move {
                record,
                images_base: &state.settings.images_base,
            },
            None => DetailContent::Message("NO MOVES MATCH THIS FILTER."),
        },
        SheetKind::Abilities => match state.abilities.selected_record() {
            Some(record) => DetailContent::Ability(record),
            None => DetailContent::Message("NO ABILITIES IN THIS SHEET."),
        },
    }
}

fn status_text(state: &AppState) -> String {
    if let Some(message) = &state.message {
        return message.clone();
    }
    let visible = state.visible_len();
    match state.sheet {
        SheetKind::Moves => format!(
            "{visible}/{} moves  filter {}",
            state.moves.records.len(),
            state.filter.label()
        ),
        SheetKind::Abilities => format!("{visible} abilities"),
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.picker.open {
        return vec![
            StatusBarHint::new("Enter", "Load"),
            StatusBarHint::new("Esc", "Cancel"),
        ];
    }
    let mut hints = vec![
        StatusBarHint::new("j/k", "Move"),
        StatusBarHint::new("g/G", "Top/End"),
        StatusBarHint::new("Tab", "Sheet"),
    ];
    if state.sheet == SheetKind::Moves {
        hints.push(StatusBarHint::new("[ ]", "Filter"));
    }
    hints.extend([
        StatusBarHint::new("o", "Open CSV"),
        StatusBarHint::new("q", "Quit"),
    ]);
    hints
}
