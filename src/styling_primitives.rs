/*
 * Platform-agnostic styling data: RGBA colors, the named color schemes every
 * window is built against, and font descriptions for labels.
 *
 * Colors deserialize from either a hex string ("#RRGGBB" / "#RRGGBBAA") or a
 * channel array ([r, g, b] / [r, g, b, a]) so layout documents can use either.
 */
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}': expected #RRGGBB or #RRGGBBAA", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |idx: usize| {
            u8::from_str_radix(&hex[idx..idx + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels(Vec<u8>),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(text) => text.parse::<Color>().map_err(|e| e.to_string()),
            ColorRepr::Channels(channels) => match channels.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
                other => Err(format!(
                    "color arrays need 3 or 4 channels, got {}",
                    other.len()
                )),
            },
        }
    }
}

/// A named palette applied uniformly to everything a window builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub name: String,
    pub background: Color,
    pub header_background: Color,
    pub panel_background: Color,
    pub accent: Color,
    pub text: Color,
    pub border: Color,
}

impl ColorScheme {
    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            background: Color::rgba(30, 30, 30, 180),
            header_background: Color::rgba(40, 40, 40, 220),
            panel_background: Color::rgba(35, 35, 35, 200),
            accent: Color::rgb(70, 130, 180),
            text: Color::WHITE,
            border: Color::rgb(60, 60, 60),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".into(),
            background: Color::rgba(240, 240, 240, 180),
            header_background: Color::rgba(220, 220, 220, 220),
            panel_background: Color::rgba(230, 230, 230, 200),
            accent: Color::rgb(70, 130, 180),
            text: Color::BLACK,
            border: Color::rgb(180, 180, 180),
        }
    }

    pub fn debug() -> Self {
        Self {
            name: "debug".into(),
            background: Color::rgba(20, 30, 20, 180),
            header_background: Color::rgba(30, 50, 30, 220),
            panel_background: Color::rgba(25, 35, 25, 200),
            accent: Color::rgb(70, 180, 70),
            text: Color::WHITE,
            border: Color::rgb(40, 100, 40),
        }
    }

    pub fn data() -> Self {
        Self {
            name: "data".into(),
            background: Color::rgba(20, 20, 30, 180),
            header_background: Color::rgba(30, 30, 50, 220),
            panel_background: Color::rgba(25, 25, 35, 200),
            accent: Color::rgb(100, 100, 180),
            text: Color::WHITE,
            border: Color::rgb(60, 60, 100),
        }
    }

    /*
     * Resolves a built-in palette by name, ignoring case. Unknown names fall
     * back to the dark palette so a typo in a layout document still produces a
     * usable window.
     */
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "debug" => Self::debug(),
            "data" => Self::data(),
            other => {
                log::warn!("ColorScheme: unknown scheme '{other}', falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontDescription {
    pub family: String,
    pub style: FontStyle,
    pub size: u16,
}

impl FontDescription {
    pub fn bold(size: u16) -> Self {
        Self {
            style: FontStyle::Bold,
            size,
            ..Self::default()
        }
    }
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            family: "Dialog".into(),
            style: FontStyle::Plain,
            size: 11,
        }
    }
}
