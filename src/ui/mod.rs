pub mod borders;
pub mod player_panel;
pub mod theme;
pub mod tui;

pub mod components {
    pub mod play_button;
    pub mod progress_bar;
    pub mod time_mark;
}
