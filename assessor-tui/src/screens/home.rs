use crate::app::Screen;

/// Entries of the module menu, in display order.
pub const MENU: [Screen; 2] = [Screen::Pd, Screen::Gis];

#[derive(Debug, Default)]
pub struct HomeScreen {
    cursor: usize,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Menu with the cursor on `screen`, used when returning from a module.
    pub fn pointing_at(screen: Screen) -> Self {
        Self {
            cursor: MENU.iter().position(|s| *s == screen).unwrap_or(0),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Screen {
        MENU[self.cursor]
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = MENU.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }
}
