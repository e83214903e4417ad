// Colour palettes for the grid chrome
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub toolbar: String,
    pub foreground: String,
    pub muted: String,
    pub border: String,
    pub primary: String,
    pub danger: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#1c1c1c".to_string(),
            toolbar: "#232323".to_string(),
            foreground: "#ededed".to_string(),
            muted: "#8f8f8f".to_string(),
            border: "#3e3e3e".to_string(),
            primary: "#3ecf8e".to_string(),
            danger: "#ef5350".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            toolbar: "#f8f9fa".to_string(),
            foreground: "#11181c".to_string(),
            muted: "#687076".to_string(),
            border: "#dfe3e6".to_string(),
            primary: "#24b47e".to_string(),
            danger: "#e5484d".to_string(),
        }
    }

    /// CSS custom properties consumed by the stylesheet.
    pub fn css_variables(&self) -> String {
        format!(
            "--bg: {}; --toolbar: {}; --fg: {}; --muted: {}; --border: {}; --primary: {}; --danger: {};",
            self.background, self.toolbar, self.foreground, self.muted, self.border, self.primary, self.danger
        )
    }

    /// Unknown names fall back to dark.
    pub fn by_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::default_light()
        } else {
            Self::default_dark()
        }
    }
}
