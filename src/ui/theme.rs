use crate::config::ThemeConfig;
use crate::error::AppError;
use egui::{Color32, Visuals};

/// Theme colors resolved from a partner theme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color32,
    pub accent: Color32,
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub border: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub logo: Color32,
}

impl Palette {
    pub fn from_theme(theme: &ThemeConfig) -> Result<Self, AppError> {
        let c = &theme.colors;
        Ok(Self {
            primary: parse_hex_color(&c.primary)?,
            accent: parse_hex_color(&c.accent)?,
            background: parse_hex_color(&c.background)?,
            surface: parse_hex_color(&c.surface)?,
            text: parse_hex_color(&c.text)?,
            border: parse_hex_color(&c.border)?,
            warning: parse_hex_color(&c.warning)?,
            error: parse_hex_color(&c.error)?,
            logo: parse_hex_color(&theme.branding.logo_color)?,
        })
    }

    /// Light mode takes the whole palette; dark mode keeps egui's dark
    /// surfaces and only borrows the accent colors.
    fn paint(&self, visuals: &mut Visuals, dark_mode: bool) {
        visuals.selection.bg_fill = self.primary;
        visuals.hyperlink_color = self.accent;
        visuals.warn_fg_color = self.warning;
        visuals.error_fg_color = self.error;
        if !dark_mode {
            visuals.panel_fill = self.background;
            visuals.window_fill = self.surface;
            visuals.faint_bg_color = self.surface;
            visuals.override_text_color = Some(self.text);
            visuals.widgets.noninteractive.bg_stroke.color = self.border;
        }
    }
}

/// Accepts `#rgb` and `#rrggbb`.
pub fn parse_hex_color(raw: &str) -> Result<Color32, AppError> {
    let invalid = || AppError::Theme(format!("invalid color {raw:?}"));
    let hex = raw.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let full: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub fn visuals(palette: Option<&Palette>, dark_mode: bool) -> Visuals {
    let mut visuals = if dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    if let Some(palette) = palette {
        palette.paint(&mut visuals, dark_mode);
    }
    visuals
}

pub fn apply(ctx: &egui::Context, palette: Option<&Palette>, dark_mode: bool) {
    ctx.set_visuals(visuals(palette, dark_mode));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1a73e8").unwrap(), Color32::from_rgb(0x1a, 0x73, 0xe8));
        assert_eq!(parse_hex_color(" #FFF ").unwrap(), Color32::WHITE);
        assert!(matches!(parse_hex_color("1a73e8"), Err(AppError::Theme(_))));
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn test_palette_from_theme() {
        let theme: ThemeConfig = serde_json::from_str(&fixtures::theme("blue", "#007bff")).unwrap();
        let palette = Palette::from_theme(&theme).unwrap();
        assert_eq!(palette.primary, Color32::from_rgb(0x00, 0x7b, 0xff));
        assert_eq!(palette.logo, palette.primary);
    }

    #[test]
    fn test_palette_rejects_bad_color() {
        let mut theme: ThemeConfig =
            serde_json::from_str(&fixtures::theme("blue", "#007bff")).unwrap();
        theme.colors.error = "red".to_string();
        assert!(Palette::from_theme(&theme).is_err());
    }

    #[test]
    fn test_light_visuals_use_palette() {
        let theme: ThemeConfig = serde_json::from_str(&fixtures::theme("blue", "#007bff")).unwrap();
        let palette = Palette::from_theme(&theme).unwrap();

        let light = visuals(Some(&palette), false);
        assert!(!light.dark_mode);
        assert_eq!(light.panel_fill, palette.background);
        assert_eq!(light.selection.bg_fill, palette.primary);

        let dark = visuals(Some(&palette), true);
        assert!(dark.dark_mode);
        assert_eq!(dark.selection.bg_fill, palette.primary);
        assert_eq!(dark.panel_fill, Visuals::dark().panel_fill);
    }
}
