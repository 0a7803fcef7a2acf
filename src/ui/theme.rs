use log::*;
use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub banner: ColorSpec,

    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    pub success: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// An RGB color.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night",
            banner: rgb(255, 159, 196),
            text: rgb(169, 177, 214),
            text_muted: rgb(117, 121, 148),
            success: rgb(158, 206, 106),
            error: rgb(247, 118, 142),
            info: rgb(125, 207, 255),
            border_active: rgb(125, 207, 255),
            border_normal: rgb(117, 121, 148),
            highlight_bg: rgb(125, 207, 255),
            highlight_fg: rgb(26, 27, 38),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn",
            banner: rgb(255, 109, 146),
            text: rgb(88, 82, 96),
            text_muted: rgb(152, 147, 165),
            success: rgb(59, 247, 209),
            error: rgb(235, 111, 146),
            info: rgb(61, 174, 233),
            border_active: rgb(161, 119, 255),
            border_normal: rgb(88, 82, 96),
            highlight_bg: rgb(61, 174, 233),
            highlight_fg: rgb(0, 0, 0),
        }
    }

    /// Get theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            _ => None,
        }
    }

    /// Get theme by name, falling back to the default theme.
    ///
    pub fn by_name(name: &str) -> Self {
        Theme::from_name(name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default.", name);
            Theme::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name() {
        assert_eq!(Theme::from_name("rose-pine-dawn").unwrap().name, "rose-pine-dawn");
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn by_name_falls_back_to_default() {
        assert_eq!(Theme::by_name("solarized"), Theme::default());
        assert_eq!(Theme::by_name("tokyo-night").name, "tokyo-night");
    }

    #[test]
    fn color_spec_to_color() {
        assert_eq!(rgb(1, 2, 3).to_color(), Color::Rgb(1, 2, 3));
    }
}
