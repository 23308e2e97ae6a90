//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::ui::layout::point_in_rect;
use crate::ui::{navbar, timeline};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    // 1-9 jump straight to a timeline entry.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            state.jump_to_entry(c as usize - '1' as usize);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::ScrollUp => state.user_scroll(-1),
        Action::ScrollDown => state.user_scroll(1),
        Action::PageUp => {
            let rows = state.page_rows();
            state.user_scroll(-rows);
        }
        Action::PageDown => {
            let rows = state.page_rows();
            state.user_scroll(rows);
        }
        Action::Top => state.user_scroll_to_top(),
        Action::Bottom => state.user_scroll_to_bottom(),
        Action::NextEntry => state.step_entry(1),
        Action::PrevEntry => state.step_entry(-1),
        Action::Quit => state.should_quit = true,
    }
}

/// Process a mouse event: wheel scrolls the page, clicks follow navbar
/// links and timeline entries.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = state.layout();
    let wheel = i64::from(state.config.wheel_rows);

    match mouse.kind {
        MouseEventKind::ScrollDown => state.user_scroll(wheel),
        MouseEventKind::ScrollUp => state.user_scroll(-wheel),
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.navbar_area, mouse.column, mouse.row) {
                if let Some(anchor) = navbar::link_at(layout.navbar_area, mouse.column) {
                    state.navigate(anchor);
                }
            } else if point_in_rect(layout.sidebar_area, mouse.column, mouse.row) {
                let hit = timeline::entry_at(
                    layout.sidebar_area,
                    state.sidebar.offset(),
                    state.tracked.len(),
                    mouse.row,
                );
                if let Some(index) = hit {
                    state.jump_to_entry(index);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    use super::*;
    use crate::config::AppConfig;
    use crate::core::coordinator::ScrollMode;
    use crate::core::page::PageDocument;

    fn state() -> AppState {
        let mut state = AppState::new(PageDocument::sample(), AppConfig::default(), Rect::new(0, 0, 100, 30));
        state.frame(Instant::now());
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn digits_jump_to_entries() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('3')));
        assert_eq!(state.coordinator.active_section_id(), Some("experience-2"));
        assert_eq!(state.coordinator.scroll_mode(), ScrollMode::Programmatic);
    }

    #[test]
    fn releases_are_ignored() {
        let mut state = state();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        handle_key(&mut state, key);
        assert!(!state.should_quit);
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn scroll_keys_are_user_input() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('j')));
        assert_eq!(state.host().row(), 1);
        handle_key(&mut state, press(KeyCode::End));
        assert_eq!(state.host().row(), state.host().max_row());
        handle_key(&mut state, press(KeyCode::Home));
        assert_eq!(state.host().row(), 0);
    }

    #[test]
    fn navbar_click_scrolls_without_activating() {
        let mut state = state();
        // "Skills" follows "Profile" and "Experience".
        let column = 7 + 2 + 7 + 2 + 10 + 2;
        handle_mouse(&mut state, click(column, 0));
        assert_eq!(state.coordinator.scroll_mode(), ScrollMode::Programmatic);
        assert_eq!(state.coordinator.active_section_id(), Some("experience-0"));
    }

    #[test]
    fn sidebar_click_jumps_to_entry() {
        let mut state = state();
        // Sidebar content starts below the navbar; entry 1 is rows 3..6.
        handle_mouse(&mut state, click(5, 1 + 3));
        assert_eq!(state.coordinator.active_section_id(), Some("experience-1"));
    }

    #[test]
    fn wheel_scrolls_by_configured_rows() {
        let mut state = state();
        handle_mouse(
            &mut state,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 50,
                row: 10,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(state.host().row(), usize::from(state.config.wheel_rows));
    }
}
