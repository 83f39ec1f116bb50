use crossterm::style::Color as CtColor;

/// The eight named slide colors accepted by `fg=`/`bg=` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Self::Black),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "blue" => Some(Self::Blue),
            "magenta" => Some(Self::Magenta),
            "cyan" => Some(Self::Cyan),
            "white" => Some(Self::White),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

/// A concrete paint for one terminal cell: the ambient default, one of the
/// eight named colors, or a truecolor value (used by the syntax highlighter
/// and image cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Default,
    Named(Color),
    Rgb(u8, u8, u8),
}

impl Paint {
    pub fn to_crossterm(self) -> CtColor {
        match self {
            Self::Default => CtColor::Reset,
            Self::Named(Color::Black) => CtColor::Black,
            Self::Named(Color::Red) => CtColor::DarkRed,
            Self::Named(Color::Green) => CtColor::DarkGreen,
            Self::Named(Color::Yellow) => CtColor::DarkYellow,
            Self::Named(Color::Blue) => CtColor::DarkBlue,
            Self::Named(Color::Magenta) => CtColor::DarkMagenta,
            Self::Named(Color::Cyan) => CtColor::DarkCyan,
            Self::Named(Color::White) => CtColor::White,
            Self::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub code_foreground: Paint,
    pub code_background: Paint,
    pub accent: Paint,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            code_foreground: Paint::Rgb(0xD4, 0xD4, 0xD4),
            code_background: Paint::Rgb(0x2D, 0x2D, 0x2D),
            accent: Paint::Rgb(0x52, 0x94, 0xE2),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            code_foreground: Paint::Rgb(0x33, 0x33, 0x33),
            code_background: Paint::Rgb(0xF5, 0xF5, 0xF5),
            accent: Paint::Rgb(0x0F, 0x34, 0x60),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Return the syntect theme name that matches this presentation theme.
    pub fn syntect_theme_name(&self) -> &str {
        if self.name == "light" {
            "InspiredGitHub"
        } else {
            "base16-ocean.dark"
        }
    }
}
