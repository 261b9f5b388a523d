//! Clickable-region registry.
//!
//! Rendering registers each clickable rectangle with the [`Action`] it
//! triggers. A left press is resolved against the registry built by the most
//! recent frame, so clicks always match what is on screen. Areas registered
//! later are drawn on top and win the hit test.

use assessor_core::controls::{Point, Region};
use ratatui::layout::Rect;

use crate::screens::Action;

#[derive(Debug, Clone)]
pub struct HitArea {
    pub region: Region,
    pub action: Action,
}

#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame's areas.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, rect: Rect, action: Action) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.areas.push(HitArea {
            region: region(rect),
            action,
        });
    }

    /// Topmost action under `at`, if any.
    pub fn hit_test(&self, at: Point) -> Option<Action> {
        self.areas
            .iter()
            .rev()
            .find(|a| a.region.contains(at))
            .map(|a| a.action.clone())
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

pub fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;

    #[test]
    fn later_areas_win() {
        let mut reg = HitAreaRegistry::new();
        reg.register(Rect::new(0, 0, 10, 10), Action::Back);
        reg.register(Rect::new(2, 2, 3, 1), Action::OpenModule(Screen::Pd));

        assert_eq!(reg.hit_test(Point::new(3, 2)), Some(Action::OpenModule(Screen::Pd)));
        assert_eq!(reg.hit_test(Point::new(8, 8)), Some(Action::Back));
        assert_eq!(reg.hit_test(Point::new(20, 20)), None);
    }

    #[test]
    fn empty_rects_are_skipped() {
        let mut reg = HitAreaRegistry::new();
        reg.register(Rect::new(0, 0, 0, 1), Action::Back);
        assert!(reg.is_empty());
    }

    #[test]
    fn clear_forgets_areas() {
        let mut reg = HitAreaRegistry::new();
        reg.register(Rect::new(0, 0, 1, 1), Action::Back);
        assert_eq!(reg.len(), 1);
        reg.clear();
        assert_eq!(reg.hit_test(Point::new(0, 0)), None);
    }
}
