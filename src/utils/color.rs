use eframe::egui::Color32;

pub trait ColorExt {
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color32::from_rgb(r, g, b))
    }
}

/// Spreadsheet-green palette used across the window.
pub struct Palette;

impl Palette {
    pub fn brand() -> Color32 {
        Color32::from_hex("#217346").unwrap_or(Color32::DARK_GREEN)
    }

    pub fn drop_highlight() -> Color32 {
        Color32::from_hex("#D9EAD3").unwrap_or(Color32::LIGHT_GREEN)
    }

    pub fn idle_border() -> Color32 {
        Color32::from_hex("#C2C2C2").unwrap_or(Color32::GRAY)
    }

    pub fn error() -> Color32 {
        Color32::from_rgb(220, 50, 50)
    }
}
