//! Color constants and style-token mapping for the terminal user interface.

use ratatui::style::Color;

use crate::preview::{BackgroundToken, Emphasis, Swatch, TextTone};

/// Accent for the focused field and the active tab.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Error messages in the status bar.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Premium badge.
pub const AMBER: Color = Color::Rgb(245, 158, 11);

/// Left-edge marker colour of a dashboard row.
pub fn emphasis_color(emphasis: Emphasis) -> Color {
    match emphasis {
        Emphasis::Strong => Color::Rgb(239, 68, 68),
        Emphasis::Moderate => Color::Rgb(234, 179, 8),
        Emphasis::Subtle => Color::Rgb(34, 197, 94),
    }
}

/// Tailwind gray scale, indexed by the hundreds digit (gray-000 is white).
fn gray(shade: u8) -> Color {
    match shade {
        0 => Color::Rgb(255, 255, 255),
        1 => Color::Rgb(243, 244, 246),
        2 => Color::Rgb(229, 231, 235),
        3 => Color::Rgb(209, 213, 219),
        4 => Color::Rgb(156, 163, 175),
        5 => Color::Rgb(107, 114, 128),
        6 => Color::Rgb(75, 85, 99),
        7 => Color::Rgb(55, 65, 81),
        8 => Color::Rgb(31, 41, 55),
        _ => Color::Rgb(17, 24, 39),
    }
}

fn swatch(s: Swatch) -> Color {
    match s {
        Swatch::Purple500 => Color::Rgb(168, 85, 247),
        Swatch::Pink500 => Color::Rgb(236, 72, 153),
        Swatch::Blue500 => Color::Rgb(59, 130, 246),
        Swatch::Indigo500 => Color::Rgb(99, 102, 241),
        Swatch::Green400 => Color::Rgb(74, 222, 128),
        Swatch::Teal500 => Color::Rgb(20, 184, 166),
    }
}

/// Top and bottom colours of the wallpaper background.
pub fn background_colors(token: &BackgroundToken) -> (Color, Color) {
    match *token {
        BackgroundToken::Monochrome { shade } => (gray(9), gray(shade)),
        BackgroundToken::SolidBlack => (Color::Black, Color::Black),
        BackgroundToken::SolidWhite => (Color::White, Color::White),
        BackgroundToken::Gradient { from, to } => (swatch(from), swatch(to)),
        // no image support in a terminal; a neutral dark fade stands in
        BackgroundToken::Image => (gray(8), gray(6)),
    }
}

/// Linear blend between two RGB colours, `t` in 0..=`steps`.
pub fn blend(a: Color, b: Color, t: u16, steps: u16) -> Color {
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) if steps > 0 => {
            let mix = |x: u8, y: u8| -> u8 {
                let (x, y, t, s) = (x as i32, y as i32, t.min(steps) as i32, steps as i32);
                (x + (y - x) * t / s) as u8
            };
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => a,
    }
}

pub fn text_color(tone: TextTone) -> Color {
    match tone {
        TextTone::LightOnDark => Color::White,
        TextTone::DarkOnLight => Color::Black,
    }
}

/// Muted variant of the text colour, for times and captions.
pub fn caption_color(tone: TextTone) -> Color {
    match tone {
        TextTone::LightOnDark => Color::Rgb(200, 200, 200),
        TextTone::DarkOnLight => Color::Rgb(70, 70, 70),
    }
}

/// Task card surface over `bg`: a tenth of white over dark wallpapers, a
/// tenth of black over light ones.
pub fn card_color(tone: TextTone, bg: Color) -> Color {
    let base = match bg {
        Color::Black => Color::Rgb(0, 0, 0),
        Color::White => Color::Rgb(255, 255, 255),
        other => other,
    };
    let tint = match tone {
        TextTone::LightOnDark => Color::Rgb(255, 255, 255),
        TextTone::DarkOnLight => Color::Rgb(0, 0, 0),
    };
    blend(base, tint, 1, 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let a = Color::Rgb(0, 100, 200);
        let b = Color::Rgb(100, 0, 0);
        assert_eq!(blend(a, b, 0, 10), a);
        assert_eq!(blend(a, b, 10, 10), b);
        assert_eq!(blend(a, b, 5, 10), Color::Rgb(50, 50, 100));
        assert_eq!(blend(Color::Black, b, 5, 10), Color::Black);
    }

    #[test]
    fn test_monochrome_fades_from_darkest_gray() {
        let (top, bottom) = background_colors(&BackgroundToken::Monochrome { shade: 0 });
        assert_eq!(top, gray(9));
        assert_eq!(bottom, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_card_color_tints_toward_text_tone() {
        assert_eq!(card_color(TextTone::LightOnDark, Color::Black), Color::Rgb(25, 25, 25));
        assert_eq!(card_color(TextTone::DarkOnLight, Color::White), Color::Rgb(230, 230, 230));
        assert_eq!(
            card_color(TextTone::LightOnDark, Color::Rgb(17, 24, 39)),
            Color::Rgb(40, 47, 60)
        );
    }
}
