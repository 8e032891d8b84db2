use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, help_display::*, key_binding_display::*, session_stats_display::*,
};

mod board_display;
mod help_display;
mod key_binding_display;
mod session_stats_display;

pub mod color {
    use lineshift_engine::Rank;
    use ratatui::style::Color;

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(40, 44, 52);
    pub const SELECTED: Color = Color::Rgb(70, 78, 92);
    pub const YELLOW: Color = Color::Rgb(255, 214, 0);
    pub const RED: Color = Color::Rgb(255, 80, 80);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);

    /// Background colour of a tile.
    ///
    /// Hue walks from 190° through 340° as the rank grows and the tile gets
    /// darker down to 32% lightness.
    pub fn tile(rank: Rank) -> Color {
        let rank = u32::from(rank);
        let hue = 190 + (rank * 18) % 150;
        let lightness = 54_u32.saturating_sub(rank * 2).max(32);
        let (r, g, b) = hsl_to_rgb(f64::from(hue), 0.7, f64::from(lightness) / 100.0);
        Color::Rgb(r, g, b)
    }

    /// Converts HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::many_single_char_names
    )]
    pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }

}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = Style::new().fg(color::GRAY);
    pub const EMPTY: Style = fg_bg(color::GRAY, color::DARK_GRAY);
    pub const EMPTY_SELECTED: Style = fg_bg(color::GRAY, color::SELECTED);
    pub const MARKER: Style = Style::new().fg(color::GRAY);
    pub const MARKER_SELECTED: Style = Style::new()
        .fg(color::YELLOW)
        .add_modifier(Modifier::BOLD);
    pub const SHIFTED: Modifier = Modifier::UNDERLINED;
    pub const STATUS: Style = Style::new().fg(color::CYAN);
    pub const GAME_OVER: Style = Style::new().fg(color::RED).add_modifier(Modifier::BOLD);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
