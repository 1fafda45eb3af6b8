use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::Component;
use super::theme::{ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN, type_color};
use crate::action::Action;
use crate::icons::{self, CategoryIcon};
use crate::schema::{AbilityRecord, MoveRecord};

pub enum DetailContent<'a> {
    Move {
        record: &'a MoveRecord,
        images_base: &'a str,
    },
    Ability(&'a AbilityRecord),
    /// A single explanatory line, e.g. for an empty filter.
    Message(&'a str),
    Empty,
}

pub struct DetailPanelProps<'a> {
    pub content: DetailContent<'a>,
}

/// Read-only detail view of the highlighted entry.
#[derive(Default)]
pub struct DetailPanel;

fn or_dash(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn title_line(name: &str) -> Line<'static> {
    Line::from(Span::styled(
        name.trim().to_uppercase(),
        Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
    ))
}

fn badge_line(label: &str, value: &str, color: Color, icon: Option<String>) -> Line<'static> {
    let label = Span::styled(format!("{label:<6}"), Style::default().fg(TEXT_DIM));
    if value.trim().is_empty() {
        return Line::from(vec![label, Span::styled("[ ? ]", Style::default().fg(TEXT_DIM))]);
    }
    let mut spans = vec![
        label,
        Span::styled(
            format!(" {} ", value.trim().to_uppercase()),
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(icon) = icon {
        spans.push(Span::styled(format!("  {icon}"), Style::default().fg(TEXT_DIM)));
    }
    Line::from(spans)
}

fn row_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), Style::default().fg(ACCENT_GOLD)),
        Span::raw(or_dash(value)),
    ])
}

pub fn move_text(record: &MoveRecord, images_base: &str) -> Text<'static> {
    let category_color = match CategoryIcon::from_category(&record.category) {
        CategoryIcon::Physical => Color::Rgb(235, 120, 64),
        CategoryIcon::Special => Color::Rgb(98, 140, 230),
        CategoryIcon::Status => Color::Rgb(170, 170, 170),
    };
    let mut lines = vec![
        title_line(&record.attack),
        Line::from(""),
        badge_line(
            "TYPE",
            &record.kind,
            type_color(&record.kind),
            Some(icons::type_icon_path(images_base, &record.kind)),
        ),
        badge_line(
            "CAT.",
            &record.category,
            category_color,
            Some(icons::category_icon_path(images_base, &record.category)),
        ),
        Line::from(""),
        row_line("LEVEL", &record.level),
        row_line("CASTING TIME", &record.casting_time),
        row_line("RANGE", &record.range),
        row_line("DURATION", &record.duration),
        Line::from(""),
    ];
    lines.push(Line::from(or_dash(&record.description)));
    Text::from(lines)
}

pub fn ability_text(record: &AbilityRecord) -> Text<'static> {
    let description = record.description.trim();
    let description = if description.is_empty() {
        "—".to_string()
    } else {
        description.to_string()
    };
    Text::from(vec![
        title_line(&record.ability),
        Line::from(""),
        Line::from(description),
    ])
}

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("DETAIL")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));
        let text = match props.content {
            DetailContent::Move {
                record,
                images_base,
            } => move_text(record, images_base),
            DetailContent::Ability(record) => ability_text(record),
            DetailContent::Message(message) => Text::from(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(TEXT_DIM),
            ))),
            DetailContent::Empty => Text::default(),
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(TEXT_MAIN));
        frame.render_widget(paragraph, area);
    }
}
