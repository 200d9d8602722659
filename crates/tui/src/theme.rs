use diamonds_core::ThemeConfig;
use ratatui::style::Color;
use tracing::warn;

/// Resolved renderer palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub selection: Color,
    pub border: Color,
    pub message_fg: Color,
    pub message_bg: Color,
    pub code_fg: Color,
    pub code_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    /// Convert configured hex strings, falling back per entry on bad values.
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: resolve("accent", &config.accent, Color::Cyan),
            text: resolve("text", &config.text, Color::White),
            muted: resolve("muted", &config.muted, Color::DarkGray),
            selection: resolve("selection", &config.selection, Color::LightCyan),
            border: resolve("border", &config.border, Color::Magenta),
            message_fg: resolve("message_fg", &config.message_fg, Color::White),
            message_bg: resolve("message_bg", &config.message_bg, Color::LightRed),
            code_fg: resolve("code_fg", &config.code_fg, Color::LightRed),
            code_bg: resolve("code_bg", &config.code_bg, Color::DarkGray),
        }
    }
}

fn resolve(field: &str, value: &str, fallback: Color) -> Color {
    parse_hex_color(value).unwrap_or_else(|| {
        warn!("theme.{field} = {value:?} is not a hex color; using {fallback:?}");
        fallback
    })
}

/// Parse `#RGB` or `#RRGGBB` into a terminal color.
pub fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}
