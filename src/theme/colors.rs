//! Color definitions for blocknote themes.
//!
//! This module defines the [`ThemeColors`] struct which contains every color
//! the terminal UI uses, grouped into block colors, UI chrome, and message
//! colors.

use ratatui::style::Color;

/// Defines all colors used in a blocknote theme.
///
/// # Examples
///
/// ```
/// use blocknote::theme::colors::ThemeColors;
/// use ratatui::style::Color;
///
/// let dark = ThemeColors::default_dark();
/// assert_eq!(dark.background, Color::Reset);
/// ```
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Block colors
    /// Color for text block content.
    pub text: Color,
    /// Color for heading block content and its marker.
    pub heading: Color,
    /// Color for bullets and nesting markers.
    pub marker: Color,
    /// Color for the placeholder shown in empty blocks.
    pub placeholder: Color,

    // UI colors
    /// Main background color for the editor.
    pub background: Color,
    /// Main foreground color for the editor.
    pub foreground: Color,
    /// Background of the focused block's lines.
    pub focus_bg: Color,
    /// Color of the input caret.
    pub caret: Color,
    /// Background color for the status line.
    pub status_line_bg: Color,
    /// Foreground color for the status line.
    pub status_line_fg: Color,

    // Semantic colors
    /// Color for error messages.
    pub error: Color,
    /// Color for warning messages.
    pub warning: Color,
    /// Color for informational messages.
    pub info: Color,
}

impl ThemeColors {
    /// Returns the default dark color scheme.
    ///
    /// Uses ANSI colors so the palette follows the user's terminal scheme.
    pub fn default_dark() -> Self {
        Self {
            text: Color::Gray,
            heading: Color::LightBlue,
            marker: Color::DarkGray,
            placeholder: Color::DarkGray,

            background: Color::Reset, // terminal default
            foreground: Color::Gray,
            focus_bg: Color::Rgb(48, 48, 48),
            caret: Color::LightBlue,
            status_line_bg: Color::White,
            status_line_fg: Color::Black,

            error: Color::Red,
            warning: Color::Yellow,
            info: Color::LightBlue,
        }
    }

    /// Returns the default light color scheme.
    pub fn default_light() -> Self {
        Self {
            text: Color::Rgb(56, 58, 66),
            heading: Color::Rgb(1, 132, 188),
            marker: Color::Rgb(160, 161, 167),
            placeholder: Color::Rgb(160, 161, 167),

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            focus_bg: Color::Rgb(229, 229, 230),
            caret: Color::Rgb(82, 139, 255),
            status_line_bg: Color::Rgb(238, 238, 238),
            status_line_fg: Color::Rgb(56, 58, 66),

            error: Color::Rgb(202, 18, 67),
            warning: Color::Rgb(152, 104, 1),
            info: Color::Rgb(1, 132, 188),
        }
    }

    /// Returns the Gruvbox Dark color scheme.
    pub fn gruvbox_dark() -> Self {
        Self {
            text: Color::Rgb(235, 219, 178),
            heading: Color::Rgb(250, 189, 47),
            marker: Color::Rgb(146, 131, 116),
            placeholder: Color::Rgb(124, 111, 100),

            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            focus_bg: Color::Rgb(60, 56, 54),
            caret: Color::Rgb(254, 128, 25),
            status_line_bg: Color::Rgb(80, 73, 69),
            status_line_fg: Color::Rgb(235, 219, 178),

            error: Color::Rgb(251, 73, 52),
            warning: Color::Rgb(250, 189, 47),
            info: Color::Rgb(131, 165, 152),
        }
    }

    /// Returns the Nord color scheme.
    pub fn nord() -> Self {
        Self {
            text: Color::Rgb(216, 222, 233),
            heading: Color::Rgb(136, 192, 208),
            marker: Color::Rgb(76, 86, 106),
            placeholder: Color::Rgb(97, 110, 136),

            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            focus_bg: Color::Rgb(59, 66, 82),
            caret: Color::Rgb(136, 192, 208),
            status_line_bg: Color::Rgb(67, 76, 94),
            status_line_fg: Color::Rgb(236, 239, 244),

            error: Color::Rgb(191, 97, 106),
            warning: Color::Rgb(235, 203, 139),
            info: Color::Rgb(129, 161, 193),
        }
    }

    /// Returns the Dracula color scheme.
    pub fn dracula() -> Self {
        Self {
            text: Color::Rgb(248, 248, 242),
            heading: Color::Rgb(189, 147, 249),
            marker: Color::Rgb(98, 114, 164),
            placeholder: Color::Rgb(98, 114, 164),

            background: Color::Rgb(40, 42, 54),
            foreground: Color::Rgb(248, 248, 242),
            focus_bg: Color::Rgb(68, 71, 90),
            caret: Color::Rgb(255, 121, 198),
            status_line_bg: Color::Rgb(68, 71, 90),
            status_line_fg: Color::Rgb(248, 248, 242),

            error: Color::Rgb(255, 85, 85),
            warning: Color::Rgb(241, 250, 140),
            info: Color::Rgb(139, 233, 253),
        }
    }
}
