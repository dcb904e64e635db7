use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub surface: Color32,
    pub skeleton: Color32,
    pub heading_size: f32,
    pub tagline_size: f32,
    pub label_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x12, 0x14, 0x1A),
            foreground: Color32::from_rgb(0xC8, 0xCC, 0xD4),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x7C, 0x86, 0xF0),
            surface: Color32::from_rgb(0x1E, 0x22, 0x2C),
            skeleton: Color32::from_rgb(0x2A, 0x2F, 0x3B),
            heading_size: 56.0,
            tagline_size: 22.0,
            label_size: 18.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x37, 0x41, 0x51),
            heading_color: Color32::from_rgb(0x11, 0x18, 0x27),
            accent: Color32::from_rgb(0x4F, 0x46, 0xE5),
            surface: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            skeleton: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            heading_size: 56.0,
            tagline_size: 22.0,
            label_size: 18.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
