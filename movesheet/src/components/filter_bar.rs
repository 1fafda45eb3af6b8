use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Tabs},
};
use tui_dispatch::EventKind;

use super::Component;
use super::theme::{ACCENT_GOLD, BG_PANEL, TEXT_DIM, focus_border};
use crate::action::Action;
use crate::filter::MoveFilter;

pub struct FilterBarProps {
    pub active: MoveFilter,
    pub is_focused: bool,
}

/// Level filter tabs for the moves sheet.
#[derive(Default)]
pub struct FilterBar;

impl FilterBar {
    /// Maps a filter key press to a filter action.
    pub fn key_action(code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Char(']') => Some(Action::FilterNext),
            KeyCode::Char('[') => Some(Action::FilterPrev),
            KeyCode::Char('0') => Some(Action::FilterSet(MoveFilter::All)),
            KeyCode::Char('x') => Some(Action::FilterSet(MoveFilter::Attack)),
            KeyCode::Char('c') => Some(Action::FilterSet(MoveFilter::Cantrip)),
            KeyCode::Char(ch @ '1'..='9') => {
                MoveFilter::from_key(&ch.to_string()).map(Action::FilterSet)
            }
            _ => None,
        }
    }
}

impl Component<Action> for FilterBar {
    type Props<'a> = FilterBarProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => Self::key_action(key.code),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("FILTER")
            .style(Style::default().bg(BG_PANEL))
            .border_style(focus_border(false));
        let titles: Vec<String> = MoveFilter::ALL.iter().map(MoveFilter::label).collect();
        let tabs = Tabs::new(titles)
            .block(block)
            .select(props.active.position())
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn filter_keys() {
        let mut bar = FilterBar;
        let props = || FilterBarProps {
            active: MoveFilter::All,
            is_focused: true,
        };
        let cases = [
            ("]", Action::FilterNext),
            ("[", Action::FilterPrev),
            ("0", Action::FilterSet(MoveFilter::All)),
            ("x", Action::FilterSet(MoveFilter::Attack)),
            ("c", Action::FilterSet(MoveFilter::Cantrip)),
            ("3", Action::FilterSet(MoveFilter::Level(3))),
        ];
        for (keys, expected) in cases {
            let actions: Vec<_> = bar
                .handle_event(&EventKind::Key(key(keys)), props())
                .into_iter()
                .collect();
            assert_eq!(actions, vec![expected], "key {keys}");
        }
    }

    #[test]
    fn unfocused_bar_ignores_keys() {
        let mut bar = FilterBar;
        let actions: Vec<_> = bar
            .handle_event(
                &EventKind::Key(key("x")),
                FilterBarProps {
                    active: MoveFilter::All,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn renders_every_filter_label() {
        let mut render = RenderHarness::new(100, 3);
        let mut bar = FilterBar;
        let output = render.render_to_string_plain(|frame| {
            bar.render(
                frame,
                frame.area(),
                FilterBarProps {
                    active: MoveFilter::Cantrip,
                    is_focused: true,
                },
            );
        });
        for label in ["ALL", "ATTACK", "CANTRIP", "LV 1", "LV 9"] {
            assert!(output.contains(label), "missing {label}");
        }
    }
}
