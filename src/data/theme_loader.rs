use crate::ui::theme::{ColorDepth, Theme, ThemePalette};

pub struct ThemeLoader;

// background, card, text, muted, control, filled track, knob, notice
type HexPalette = [&'static str; 8];

// Catppuccin: base, surface0, text, subtext0, mauve, teal, lavender, peach.
const LATTE: HexPalette = ["#eff1f5", "#ccd0da", "#4c4f69", "#6c6f85", "#8839ef", "#179299", "#7287fd", "#fe640b"];
const FRAPPE: HexPalette = ["#303446", "#414559", "#c6d0f5", "#a5adce", "#ca9ee6", "#81c8be", "#babbf1", "#ef9f76"];
const MACCHIATO: HexPalette = ["#24273a", "#363a4f", "#cad3f5", "#a5adcb", "#c6a0f6", "#8bd5ca", "#b7bdf8", "#f5a97f"];
const MOCHA: HexPalette = ["#1e1e2e", "#313244", "#cdd6f4", "#a6adc8", "#cba6f7", "#94e2d5", "#b4befe", "#fab387"];
// The original widget's card colours, shown only on truecolor terminals.
const SYSTEM: HexPalette = ["#f7fafc", "#f1e6c5", "#4a5568", "#b9b7a7", "#5e7d75", "#0987a0", "#ffffff", "#c05621"];

impl ThemeLoader {
    pub fn load(name: &str) -> Theme {
        Self::load_with_depth(name, ColorDepth::detect())
    }

    pub fn load_with_depth(name: &str, depth: ColorDepth) -> Theme {
        let (raw, system) = match name.trim().to_lowercase().as_str() {
            "latte" => (LATTE, false),
            "frappe" => (FRAPPE, false),
            "macchiato" => (MACCHIATO, false),
            "mocha" => (MOCHA, false),
            _ => (SYSTEM, true),
        };

        // the system look defers to the terminal's own colours unless truecolor is there
        let depth = if system && depth != ColorDepth::TrueColor {
            ColorDepth::Plain
        } else {
            depth
        };

        Theme {
            palette: palette_from_hex(&raw),
            depth,
        }
    }
}

fn palette_from_hex(raw: &HexPalette) -> ThemePalette {
    ThemePalette {
        background: parse_hex(raw[0]),
        card: parse_hex(raw[1]),
        text: parse_hex(raw[2]),
        muted: parse_hex(raw[3]),
        control: parse_hex(raw[4]),
        filled_track: parse_hex(raw[5]),
        knob: parse_hex(raw[6]),
        notice: parse_hex(raw[7]),
    }
}

fn parse_hex(s: &str) -> (u8, u8, u8) {
    let s = s.trim_start_matches('#');
    let channel = |i: usize| {
        s.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(255)
    };
    (channel(0), channel(2), channel(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_valid_and_broken() {
        assert_eq!(parse_hex("#1e1e2e"), (0x1e, 0x1e, 0x2e));
        assert_eq!(parse_hex("cba6f7"), (0xcb, 0xa6, 0xf7));
        assert_eq!(parse_hex("#12"), (0x12, 255, 255));
        assert_eq!(parse_hex("#zz0000"), (255, 0, 0));
    }

    #[test]
    fn names_pick_palettes_loosely() {
        let latte = ThemeLoader::load_with_depth(" Latte ", ColorDepth::TrueColor);
        assert_eq!(latte.palette.background, (0xef, 0xf1, 0xf5));
        assert_eq!(latte.palette.control, (0x88, 0x39, 0xef));

        let mocha = ThemeLoader::load_with_depth("MOCHA", ColorDepth::Indexed);
        assert_eq!(mocha.palette.card, (0x31, 0x32, 0x44));
        assert_eq!(mocha.depth, ColorDepth::Indexed);
    }

    #[test]
    fn unknown_name_falls_back_to_system() {
        let t = ThemeLoader::load_with_depth("solarized", ColorDepth::TrueColor);
        assert_eq!(t.palette.card, (0xf1, 0xe6, 0xc5));
        assert_eq!(t.depth, ColorDepth::TrueColor);

        let plain = ThemeLoader::load_with_depth("system", ColorDepth::Indexed);
        assert_eq!(plain.depth, ColorDepth::Plain);
    }
}
