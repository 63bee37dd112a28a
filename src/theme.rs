//! Dashboard palette.
//!
//! Colors are stored as plain RGB triples so both the ratatui widgets and the
//! plotters chart can convert them without sharing a color type.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_ratatui(self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.0, self.1, self.2)
    }

    pub fn to_plotters(self) -> plotters::style::RGBColor {
        plotters::style::RGBColor(self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Header border (`#006d77`).
    pub primary: Rgb,
    /// Bars, chart lines and highlighted values (`#83c5be`).
    pub secondary: Rgb,
    /// Axes, markers and selection background (`#edf6f9`).
    pub accent: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Rgb(0x00, 0x6d, 0x77),
            secondary: Rgb(0x83, 0xc5, 0xbe),
            accent: Rgb(0xed, 0xf6, 0xf9),
        }
    }
}
