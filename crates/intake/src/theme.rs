use std::env;

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorMode {
    pub fn detect() -> Self {
        if let Ok(v) = env::var("INTAKE_COLOR_MODE") {
            match v.to_ascii_lowercase().as_str() {
                "24bit" | "truecolor" | "rgb" => return ColorMode::TrueColor,
                "256" | "ansi256" => return ColorMode::Ansi256,
                "16" | "ansi16" | "ansi" => return ColorMode::Ansi16,
                _ => {}
            }
        }
        if let Ok(v) = env::var("COLORTERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("truecolor") || l.contains("24bit") {
                return ColorMode::TrueColor;
            }
        }
        if let Ok(v) = env::var("TERM") {
            if v.to_ascii_lowercase().contains("256color") {
                return ColorMode::Ansi256;
            }
        }
        ColorMode::Ansi16
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiGroup {
    Base,
    Border,
    Dimmed,
    Title,
    Label,
    FocusedLabel,
    Input,
    Placeholder,
    Button,
    ButtonDisabled,
    Success,
    Error,
    Statusline,
    Backdrop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgb,
    pub fg: Rgb,
    pub dim: Rgb,
    pub border: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub error: Rgb,
    pub backdrop: Rgb,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            bg: Rgb(250, 250, 250),
            fg: Rgb(24, 24, 27),
            dim: Rgb(113, 113, 122),
            border: Rgb(212, 212, 216),
            accent: Rgb(37, 99, 235),
            success: Rgb(22, 163, 74),
            error: Rgb(220, 38, 38),
            backdrop: Rgb(161, 161, 170),
        }
    }

    // Subtiles dunkles Theme (nvim-ähnlich)
    pub fn dark() -> Self {
        Self {
            bg: Rgb(26, 27, 38),
            fg: Rgb(192, 202, 245),
            dim: Rgb(107, 112, 137),
            border: Rgb(59, 63, 81),
            accent: Rgb(125, 207, 255),
            success: Rgb(158, 206, 106),
            error: Rgb(247, 118, 142),
            backdrop: Rgb(16, 16, 22),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ColorMode,
    pub dark: bool,
    pub palette: Palette,
}

impl Theme {
    pub fn new(mode: ColorMode, dark: bool) -> Self {
        let palette = if dark { Palette::dark() } else { Palette::light() };
        Self { mode, dark, palette }
    }

    pub fn from_env(dark: bool) -> Self {
        Self::new(ColorMode::detect(), dark)
    }

    /// Follow the session's `dark_mode` flag.
    pub fn sync(&mut self, dark: bool) {
        if self.dark != dark {
            *self = Self::new(self.mode, dark);
        }
    }

    pub fn label(&self) -> &'static str {
        if self.dark { "dark" } else { "light" }
    }

    pub fn style(&self, group: UiGroup) -> Style {
        let p = &self.palette;
        let base = Style::default().bg(self.color(p.bg));
        match group {
            UiGroup::Base => base.fg(self.color(p.fg)),
            UiGroup::Border => base.fg(self.color(p.border)),
            UiGroup::Dimmed => base.fg(self.color(p.dim)),
            UiGroup::Title => base.fg(self.color(p.fg)).add_modifier(Modifier::BOLD),
            UiGroup::Label => base.fg(self.color(p.dim)),
            UiGroup::FocusedLabel => base.fg(self.color(p.accent)).add_modifier(Modifier::BOLD),
            UiGroup::Input => base.fg(self.color(p.fg)),
            UiGroup::Placeholder => base.fg(self.color(p.dim)).add_modifier(Modifier::ITALIC),
            UiGroup::Button => Style::default()
                .bg(self.color(p.accent))
                .fg(self.color(p.bg))
                .add_modifier(Modifier::BOLD),
            UiGroup::ButtonDisabled => Style::default()
                .bg(self.color(p.border))
                .fg(self.color(p.dim)),
            UiGroup::Success => base.fg(self.color(p.success)).add_modifier(Modifier::BOLD),
            UiGroup::Error => base.fg(self.color(p.error)).add_modifier(Modifier::BOLD),
            UiGroup::Statusline => Style::default()
                .bg(self.color(p.border))
                .fg(self.color(p.fg)),
            UiGroup::Backdrop => Style::default().bg(self.color(p.backdrop)),
        }
    }

    pub fn color(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(rgb_to_ansi256(rgb)),
            ColorMode::Ansi16 => ansi16_from_rgb(rgb),
        }
    }
}

fn rgb_to_ansi256(Rgb(r, g, b): Rgb) -> u8 {
    // 6x6x6 cube vs. grayscale ramp, whichever is closer
    let step = |c: u8| (c as f32 / 255.0 * 5.0).round() as u8;
    let (ri, gi, bi) = (step(r), step(g), step(b));
    let cube = 16 + 36 * ri + 6 * gi + bi;

    let avg = (r as f32 + g as f32 + b as f32) / 3.0;
    let gray_idx = (avg / 255.0 * 23.0).round() as u8;

    let dist = |cr: f32, cg: f32, cb: f32| {
        (cr - r as f32).abs() + (cg - g as f32).abs() + (cb - b as f32).abs()
    };
    let level = |i: u8| i as f32 * 255.0 / 5.0;
    let dcube = dist(level(ri), level(gi), level(bi));
    let gval = gray_idx as f32 * 255.0 / 23.0;
    let dgray = dist(gval, gval, gval);
    if dgray + 15.0 < dcube { 232 + gray_idx } else { cube }
}

fn ansi16_from_rgb(Rgb(r, g, b): Rgb) -> Color {
    const BASE: [(Color, Color, (i32, i32, i32)); 8] = [
        (Color::Black, Color::DarkGray, (0, 0, 0)),
        (Color::Red, Color::LightRed, (205, 0, 0)),
        (Color::Green, Color::LightGreen, (0, 205, 0)),
        (Color::Yellow, Color::LightYellow, (205, 205, 0)),
        (Color::Blue, Color::LightBlue, (0, 0, 238)),
        (Color::Magenta, Color::LightMagenta, (205, 0, 205)),
        (Color::Cyan, Color::LightCyan, (0, 205, 205)),
        (Color::Gray, Color::White, (229, 229, 229)),
    ];
    let bright = (r as u16 + g as u16 + b as u16) / 3 > 128;
    BASE.iter()
        .min_by_key(|(_, _, (cr, cg, cb))| {
            (cr - r as i32).abs() + (cg - g as i32).abs() + (cb - b as i32).abs()
        })
        .map(|(normal, light, _)| if bright { *light } else { *normal })
        .unwrap_or(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_switches_palette() {
        let mut theme = Theme::new(ColorMode::TrueColor, false);
        assert_eq!(theme.palette, Palette::light());
        theme.sync(true);
        assert_eq!(theme.palette, Palette::dark());
        assert_eq!(theme.label(), "dark");
    }

    #[test]
    fn truecolor_keeps_exact_rgb() {
        let theme = Theme::new(ColorMode::TrueColor, true);
        assert_eq!(theme.color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn reduced_modes_map_extremes() {
        assert_eq!(rgb_to_ansi256(Rgb(255, 0, 0)), 196);
        assert_eq!(ansi16_from_rgb(Rgb(0, 0, 0)), Color::Black);
        assert_eq!(ansi16_from_rgb(Rgb(255, 255, 255)), Color::White);
    }
}
