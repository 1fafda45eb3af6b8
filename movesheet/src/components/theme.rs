use ratatui::style::{Color, Modifier, Style};
use tui_dispatch_components::{BaseStyle, Padding, SelectListStyle, SelectionStyle};

pub const BG_BASE: Color = Color::Rgb(18, 16, 24);
pub const BG_PANEL: Color = Color::Rgb(30, 27, 40);
pub const BG_HIGHLIGHT: Color = Color::Rgb(92, 44, 56);
pub const BG_MODAL: Color = Color::Rgb(38, 34, 50);
pub const TEXT_MAIN: Color = Color::Rgb(240, 236, 228);
pub const TEXT_DIM: Color = Color::Rgb(170, 162, 180);
pub const ACCENT_RED: Color = Color::Rgb(226, 84, 84);
pub const ACCENT_GOLD: Color = Color::Rgb(236, 190, 96);

pub fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

pub fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

/// Badge colour for a move type; unknown types fall back to grey.
pub fn type_color(kind: &str) -> Color {
    match kind.trim().to_lowercase().as_str() {
        "normal" => Color::Rgb(168, 167, 122),
        "fire" => Color::Rgb(238, 129, 48),
        "water" => Color::Rgb(99, 144, 240),
        "electric" => Color::Rgb(247, 208, 44),
        "grass" => Color::Rgb(122, 199, 76),
        "ice" => Color::Rgb(150, 217, 214),
        "fighting" => Color::Rgb(194, 46, 40),
        "poison" => Color::Rgb(163, 62, 161),
        "ground" => Color::Rgb(226, 191, 101),
        "flying" => Color::Rgb(169, 143, 243),
        "psychic" => Color::Rgb(249, 85, 135),
        "bug" => Color::Rgb(166, 185, 26),
        "rock" => Color::Rgb(182, 161, 54),
        "ghost" => Color::Rgb(115, 87, 151),
        "dragon" => Color::Rgb(111, 53, 252),
        "dark" => Color::Rgb(112, 87, 70),
        "steel" => Color::Rgb(183, 183, 206),
        "fairy" => Color::Rgb(214, 133, 173),
        _ => Color::Rgb(120, 120, 130),
    }
}
