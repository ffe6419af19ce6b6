use ratatui::style::Color;

/// Colors used by the browser screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Background of the selected row
    pub highlight: Color,
    /// Installed programs
    pub real: Color,
    /// Filler programs
    pub filler: Color,
    pub border: Color,
    /// Status bar background
    pub status: Color,
    pub rounded_borders: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            highlight: Color::Red,
            real: Color::LightGreen,
            filler: Color::White,
            border: Color::White,
            status: Color::Green,
            rounded_borders: false,
        }
    }
}

/// Clickable buttons under the program list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Launch,
    Prev,
    Next,
    Quit,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Launch, Button::Prev, Button::Next, Button::Quit];

    pub fn label(self) -> &'static str {
        match self {
            Button::Launch => "LAUNCH",
            Button::Prev => "< PREV",
            Button::Next => "NEXT >",
            Button::Quit => "QUIT",
        }
    }
}

/// Parses a color name, hex, `rgb(r,g,b)` or 8-bit index into a ratatui [Color]
///
/// Case-insensitive
pub fn parse_color(val: &str) -> Result<Color, &'static str> {
    let color_str = val.trim();

    if let Some(hex_color) = parse_hex_color(color_str) {
        return Ok(hex_color);
    }

    if let Some(rgb_color) = parse_rgb_color(color_str) {
        return Ok(rgb_color);
    }

    if let Ok(index) = color_str.parse::<u8>() {
        return Ok(Color::Indexed(index));
    }

    match color_str.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err("unknown color format. Use: named colors (red, blue, etc.), hex (#ff0000), RGB (rgb(255,0,0)), or 8-bit index (0-255)"),
    }
}

/// Parse hex color in format #RRGGBB or #RGB
fn parse_hex_color(color_str: &str) -> Option<Color> {
    let hex = color_str.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #RGB -> #RRGGBB
        3 => Some(Color::Rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        _ => None,
    }
}

/// Parse RGB color in format rgb(r,g,b)
fn parse_rgb_color(color_str: &str) -> Option<Color> {
    let values = color_str.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<u8> = values
        .split(',')
        .map(|s| s.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match parts[..] {
        [r, g, b] => Some(Color::Rgb(r, g, b)),
        _ => None,
    }
}
