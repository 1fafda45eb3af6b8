use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{SelectList, SelectListBehavior, SelectListProps};

use super::Component;
use super::theme::{ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN, focus_border, list_style};
use crate::action::Action;

/// Two-line stand-in shown instead of list rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub title: String,
    pub hint: String,
}

impl Placeholder {
    pub fn new(title: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hint: hint.into(),
        }
    }
}

pub struct EntryListProps<'a> {
    pub title: &'a str,
    pub items: &'a [Line<'static>],
    pub selected: Option<usize>,
    /// Replaces the rows when set.
    pub placeholder: Option<&'a Placeholder>,
    pub is_focused: bool,
}

pub struct EntryList {
    list: SelectList,
}

impl Default for EntryList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for EntryList {
    type Props<'a> = EntryListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.placeholder.is_some() || props.items.is_empty() {
            return Vec::new();
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('j') => vec![Action::SelectionMove(1)],
                KeyCode::Char('k') => vec![Action::SelectionMove(-1)],
                KeyCode::PageDown => vec![Action::SelectionPage(1)],
                KeyCode::PageUp => vec![Action::SelectionPage(-1)],
                KeyCode::Char('g') | KeyCode::Home => vec![Action::SelectionJumpTop],
                KeyCode::Char('G') | KeyCode::End => vec![Action::SelectionJumpBottom],
                _ => {
                    let list_props = SelectListProps {
                        items: props.items,
                        count: props.items.len(),
                        selected: props.selected.unwrap_or(0).min(props.items.len() - 1),
                        is_focused: true,
                        style: list_style(),
                        behavior: SelectListBehavior {
                            show_scrollbar: true,
                            wrap_navigation: false,
                        },
                        on_select: Action::EntrySelect,
                        render_item: &|item| item.clone(),
                    };
                    self.list.handle_event(event, list_props).into_iter().collect()
                }
            },
            EventKind::Scroll { delta, .. } => vec![Action::SelectionMove(*delta as i16)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(props.title.to_string())
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(placeholder) = props.placeholder {
            let lines = vec![
                Line::from(Span::styled(
                    placeholder.title.clone(),
                    Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    placeholder.hint.clone(),
                    Style::default().fg(TEXT_DIM),
                )),
            ];
            let padded = Rect {
                x: inner.x.saturating_add(1),
                width: inner.width.saturating_sub(2),
                ..inner
            };
            frame.render_widget(Paragraph::new(lines), padded);
            return;
        }

        let list_props = SelectListProps {
            items: props.items,
            count: props.items.len(),
            selected: props
                .selected
                .unwrap_or(0)
                .min(props.items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::EntrySelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn code(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn items() -> Vec<Line<'static>> {
        vec![Line::from("Ember"), Line::from("Tackle"), Line::from("Bolt")]
    }

    fn collect(list: &mut EntryList, event: EventKind, items: &[Line<'static>]) -> Vec<Action> {
        list.handle_event(
            &event,
            EntryListProps {
                title: "MOVES",
                items,
                selected: Some(0),
                placeholder: None,
                is_focused: true,
            },
        )
        .into_iter()
        .collect()
    }

    #[test]
    fn paging_and_jumps() {
        let mut list = EntryList::new();
        let items = items();
        assert_eq!(
            collect(&mut list, code(KeyCode::PageDown), &items),
            vec![Action::SelectionPage(1)]
        );
        assert_eq!(
            collect(
                &mut list,
                EventKind::Key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
                &items
            ),
            vec![Action::SelectionJumpBottom]
        );
        assert_eq!(
            collect(&mut list, EventKind::Key(key("g")), &items),
            vec![Action::SelectionJumpTop]
        );
        assert_eq!(
            collect(&mut list, EventKind::Key(key("k")), &items),
            vec![Action::SelectionMove(-1)]
        );
    }

    #[test]
    fn down_selects_next_entry() {
        let mut list = EntryList::new();
        let items = items();
        let actions = collect(&mut list, code(KeyCode::Down), &items);
        assert_eq!(actions, vec![Action::EntrySelect(1)]);
    }

    #[test]
    fn empty_list_ignores_navigation() {
        let mut list = EntryList::new();
        assert!(collect(&mut list, code(KeyCode::Down), &[]).is_empty());
    }

    #[test]
    fn placeholder_replaces_rows() {
        let mut render = RenderHarness::new(40, 6);
        let mut list = EntryList::new();
        let items = items();
        let placeholder = Placeholder::new("FAILED TO READ CSV", "CHECK FORMAT");
        let output = render.render_to_string_plain(|frame| {
            list.render(
                frame,
                frame.area(),
                EntryListProps {
                    title: "MOVES",
                    items: &items,
                    selected: Some(0),
                    placeholder: Some(&placeholder),
                    is_focused: true,
                },
            );
        });
        assert!(output.contains("FAILED TO READ CSV"));
        assert!(output.contains("CHECK FORMAT"));
        assert!(!output.contains("Ember"));
    }
}
