//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::Color;

/// Color theme for the application.
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Dimmed text (placeholders, help lines).
    pub muted: Color,
    /// Border color for unfocused widgets.
    pub border: Color,
    /// Border color for the focused widget.
    pub border_focused: Color,
    /// Highlight color for selected list items.
    pub highlight: Color,
    /// Accent color for titles and ingredient chips.
    pub accent: Color,
    /// Success color.
    pub success: Color,
    /// Warning color.
    pub warning: Color,
    /// Error color.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            highlight: Color::Cyan,
            accent: Color::Green,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Get the application theme.
pub fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(Theme::default)
}

/// Badge color for a NutriScore grade letter.
///
/// Same palette the service's product labels use; unknown grades fall
/// back to grey.
pub fn nutri_score_color(grade: &str) -> Color {
    match grade.trim().to_ascii_uppercase().as_str() {
        "A" => Color::Rgb(0x1e, 0x7b, 0x1e),
        "B" => Color::Rgb(0x85, 0xbb, 0x2f),
        "C" => Color::Rgb(0xf9, 0xc2, 0x3d),
        "D" => Color::Rgb(0xf7, 0x7c, 0x00),
        "E" => Color::Rgb(0xe6, 0x39, 0x46),
        _ => Color::Rgb(0x66, 0x66, 0x66),
    }
}

/// Text color for a health rating label (Excellent/Good/Average/Poor).
pub fn health_category_color(category: &str) -> Color {
    let lower = category.to_ascii_lowercase();
    if lower.contains("excellent") || lower.contains("good") {
        Color::Green
    } else if lower.contains("poor") || lower.contains("bad") {
        Color::Red
    } else {
        Color::Yellow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutri_score_colors() {
        assert_eq!(nutri_score_color("A"), Color::Rgb(0x1e, 0x7b, 0x1e));
        assert_eq!(nutri_score_color("e"), Color::Rgb(0xe6, 0x39, 0x46));
        assert_eq!(nutri_score_color(" b "), Color::Rgb(0x85, 0xbb, 0x2f));
        // Unknown grades get the fallback
        assert_eq!(nutri_score_color("Z"), Color::Rgb(0x66, 0x66, 0x66));
        assert_eq!(nutri_score_color(""), Color::Rgb(0x66, 0x66, 0x66));
    }

    #[test]
    fn test_health_category_colors() {
        assert_eq!(health_category_color("Excellent"), Color::Green);
        assert_eq!(health_category_color("Good"), Color::Green);
        assert_eq!(health_category_color("Poor"), Color::Red);
        assert_eq!(health_category_color("Average"), Color::Yellow);
        assert_eq!(health_category_color(""), Color::Yellow);
    }
}
