use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, TextInput, TextInputProps,
    TextInputStyle, centered_rect,
};

use super::Component;
use super::theme::{ACCENT_GOLD, ACCENT_RED, BG_MODAL, BG_PANEL, TEXT_DIM};
use crate::action::Action;

const PLACEHOLDER: &str = "path/to/sheet.csv or https://...";

/// Modal text prompt for a CSV path or URL.
pub struct FilePicker {
    input: TextInput,
    modal: Modal,
    was_open: bool,
}

pub struct FilePickerProps<'a> {
    pub path: &'a str,
    /// Sheet label the file loads into ("MOVES").
    pub target: &'a str,
    /// Expected default file name, shown as a hint.
    pub suggestion: &'a str,
    pub error: Option<&'a str>,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for FilePicker {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the input each time the picker opens.
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
    }

    fn input_style(bg: Option<ratatui::style::Color>) -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg,
                fg: None,
            },
            placeholder_style: Some(Style::default().fg(TEXT_DIM)),
            cursor_style: None,
        }
    }
}

impl Component<Action> for FilePicker {
    type Props<'a> = FilePickerProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc => return vec![Action::PickerClose],
            KeyCode::Enter => return vec![(props.on_submit)(props.path.to_string())],
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.path,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: Self::input_style(None),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 8 {
            return;
        }

        let FilePicker { input, modal, .. } = self;
        let modal_area = centered_rect(60, 12, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Length(1),
                Constraint::Length(1), // Input
                Constraint::Length(1),
                Constraint::Min(1), // Hint or error
            ])
            .split(content_area);

            let title = Line::from(vec![
                Span::styled(
                    " OPEN CSV ",
                    Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("for {}", props.target), Style::default().fg(TEXT_DIM)),
            ]);
            frame.render_widget(Paragraph::new(title), chunks[0]);

            let input_props = TextInputProps {
                value: props.path,
                placeholder: PLACEHOLDER,
                is_focused: props.is_focused,
                style: Self::input_style(Some(BG_PANEL)),
                on_change: props.on_change,
                on_submit: props.on_submit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[2], input_props);

            let footer = match props.error {
                Some(error) => Line::from(Span::styled(
                    format!(" {error}"),
                    Style::default().fg(ACCENT_RED),
                )),
                None => Line::from(Span::styled(
                    format!(" LOAD {}  Enter open  Esc close", props.suggestion),
                    Style::default().fg(TEXT_DIM),
                )),
            };
            frame.render_widget(Paragraph::new(footer), chunks[4]);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_MODAL),
                        padding: Padding::xy(1, 1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::PickerClose,
                render_content: &mut render_content,
            },
        );
    }
}
