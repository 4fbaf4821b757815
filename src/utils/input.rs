use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    TogglePlayPause,
    SeekBackward,
    SeekForward,
    SeekStart,

    SeekToFraction(f32),

    MouseClick { col: u16, row: u16 },
    MouseDrag { col: u16, row: u16 },
    MouseRelease,

    None,
}

pub fn map_key(ev: KeyEvent) -> Action {
    if ev.kind == KeyEventKind::Release {
        return Action::None;
    }

    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Action::Quit,
            _ => Action::None,
        };
    }

    match ev.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Enter => Action::TogglePlayPause,
        KeyCode::Left => Action::SeekBackward,
        KeyCode::Right => Action::SeekForward,
        KeyCode::Home => Action::SeekStart,
        _ => Action::None,
    }
}

pub fn map_mouse(ev: MouseEvent) -> Action {
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::MouseClick {
            col: ev.column,
            row: ev.row,
        },
        MouseEventKind::Drag(MouseButton::Left) => Action::MouseDrag {
            col: ev.column,
            row: ev.row,
        },
        MouseEventKind::Up(MouseButton::Left) => Action::MouseRelease,
        _ => Action::None,
    }
}
