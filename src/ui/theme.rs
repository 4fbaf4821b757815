use ratatui::style::{Color, Style};

pub type Rgb = (u8, u8, u8);

/// What a colour is used for on the player card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Background,
    Card,
    Text,
    Muted,
    Control,
    FilledTrack,
    Knob,
    Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: Rgb,
    pub card: Rgb,
    pub text: Rgb,
    /// Hints, the empty track and the card border.
    pub muted: Rgb,
    pub control: Rgb,
    pub filled_track: Rgb,
    pub knob: Rgb,
    pub notice: Rgb,
}

impl ThemePalette {
    fn rgb(&self, role: Role) -> Rgb {
        match role {
            Role::Background => self.background,
            Role::Card => self.card,
            Role::Text => self.text,
            Role::Muted => self.muted,
            Role::Control => self.control,
            Role::FilledTrack => self.filled_track,
            Role::Knob => self.knob,
            Role::Notice => self.notice,
        }
    }
}

/// How many colours the terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Indexed,
    Plain,
}

impl ColorDepth {
    pub fn detect() -> Self {
        Self::from_env(
            &std::env::var("COLORTERM").unwrap_or_default(),
            &std::env::var("TERM").unwrap_or_default(),
        )
    }

    pub fn from_env(colorterm: &str, term: &str) -> Self {
        let colorterm = colorterm.to_lowercase();
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            Self::TrueColor
        } else if term.to_lowercase().contains("256color") {
            Self::Indexed
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub palette: ThemePalette,
    pub depth: ColorDepth,
}

impl Theme {
    pub fn color(&self, role: Role) -> Color {
        let (r, g, b) = self.palette.rgb(role);
        match self.depth {
            ColorDepth::TrueColor => Color::Rgb(r, g, b),
            ColorDepth::Indexed => Color::Indexed(cube_index(r, g, b)),
            ColorDepth::Plain => Color::Reset,
        }
    }

    pub fn fg(&self, role: Role) -> Style {
        Style::default().fg(self.color(role))
    }
}

// nearest cell of the 6x6x6 cube at 16..=231
fn cube_index(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| ((c as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ThemePalette {
        ThemePalette {
            background: (0, 0, 0),
            card: (10, 10, 10),
            text: (200, 200, 200),
            muted: (90, 90, 90),
            control: (255, 0, 0),
            filled_track: (0, 255, 0),
            knob: (255, 255, 255),
            notice: (0, 0, 255),
        }
    }

    #[test]
    fn depth_from_env() {
        assert_eq!(ColorDepth::from_env("truecolor", "xterm"), ColorDepth::TrueColor);
        assert_eq!(ColorDepth::from_env("24BIT", ""), ColorDepth::TrueColor);
        assert_eq!(ColorDepth::from_env("", "xterm-256color"), ColorDepth::Indexed);
        assert_eq!(ColorDepth::from_env("", "vt100"), ColorDepth::Plain);
    }

    #[test]
    fn roles_pick_their_slot() {
        let t = Theme { palette: palette(), depth: ColorDepth::TrueColor };
        assert_eq!(t.color(Role::Control), Color::Rgb(255, 0, 0));
        assert_eq!(t.color(Role::FilledTrack), Color::Rgb(0, 255, 0));
        assert_eq!(t.color(Role::Knob), Color::Rgb(255, 255, 255));
        assert_eq!(t.color(Role::Notice), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn indexed_rounds_to_nearest_cell() {
        let t = Theme { palette: palette(), depth: ColorDepth::Indexed };
        assert_eq!(t.color(Role::Background), Color::Indexed(16));
        assert_eq!(t.color(Role::Knob), Color::Indexed(231));
        assert_eq!(t.color(Role::Control), Color::Indexed(196));
        // 200 sits closer to level 4 than 3
        assert_eq!(cube_index(200, 0, 0), 16 + 36 * 4);
    }

    #[test]
    fn plain_defers_to_terminal() {
        let t = Theme { palette: palette(), depth: ColorDepth::Plain };
        assert_eq!(t.color(Role::Text), Color::Reset);
    }
}
