//! Labeled single-value selector over a fixed option list.
//!
//! The dropdown does not own the value it edits: the owning form passes the
//! current value in when rendering and stores whatever [`Dropdown::select`]
//! hands back. The dropdown only tracks its own open/closed state, the
//! keyboard highlight and the region it was last drawn into.
//!
//! Outside-press detection: each mounted dropdown is a [`PointerListener`]
//! and sees every pointer press for as long as it is mounted. It only acts
//! while open. There is no cross-instance coordination; two dropdowns can be
//! open at once if nothing presses outside either of them.

use super::region::{Point, PointerListener, Region};

/// Text shown when no option matches the current value.
pub const PLACEHOLDER: &str = "— выберите —";

/// One selectable entry: a value plus its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownOption<T> {
    pub value: T,
    pub label: &'static str,
}

impl<T> DropdownOption<T> {
    pub const fn new(value: T, label: &'static str) -> Self {
        Self { value, label }
    }
}

#[derive(Debug, Clone)]
pub struct Dropdown<T: 'static> {
    options: &'static [DropdownOption<T>],
    is_open: bool,
    highlight: usize,
    region: Region,
}

impl<T: Copy + PartialEq> Dropdown<T> {
    pub fn new(options: &'static [DropdownOption<T>]) -> Self {
        Self {
            options,
            is_open: false,
            highlight: 0,
            region: Region::default(),
        }
    }

    pub fn options(&self) -> &'static [DropdownOption<T>] {
        self.options
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Label of the option matching `value`, or the placeholder.
    pub fn label_for(&self, value: Option<T>) -> &'static str {
        value
            .and_then(|v| self.options.iter().find(|o| o.value == v))
            .map(|o| o.label)
            .unwrap_or(PLACEHOLDER)
    }

    /// Click on the control surface. Opening puts the highlight on the
    /// current value so keyboard users start from where they are.
    pub fn toggle(&mut self, current: Option<T>) {
        if self.is_open {
            self.is_open = false;
        } else {
            self.is_open = true;
            self.highlight = current
                .and_then(|v| self.options.iter().position(|o| o.value == v))
                .unwrap_or(0);
        }
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Keyboard focus moved to another control.
    pub fn focus_lost(&mut self) {
        self.close();
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// Move the highlight by `delta`, clamped to the option list. No-op while closed.
    pub fn move_highlight(&mut self, delta: isize) {
        if !self.is_open || self.options.is_empty() {
            return;
        }
        let last = self.options.len() as isize - 1;
        self.highlight = (self.highlight as isize + delta).clamp(0, last) as usize;
    }

    /// Set the value and close. Returns the value for the owning form to store.
    pub fn select(&mut self, value: T) -> T {
        if let Some(pos) = self.options.iter().position(|o| o.value == value) {
            self.highlight = pos;
        }
        self.is_open = false;
        value
    }

    /// Select the highlighted option, if the list is open.
    pub fn commit(&mut self) -> Option<T> {
        if !self.is_open {
            return None;
        }
        let value = self.options.get(self.highlight)?.value;
        Some(self.select(value))
    }

    /// Record where the control (and, while open, its list) was drawn.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

impl<T: Copy + PartialEq> PointerListener for Dropdown<T> {
    fn on_pointer_down(&mut self, at: Point) {
        if self.is_open && !self.region.contains(at) {
            self.is_open = false;
        }
    }
}

/// Type-erased view of a dropdown, for front-ends that hold dropdowns over
/// several value types side by side.
pub trait DropdownControl: PointerListener {
    fn is_open(&self) -> bool;
    fn close(&mut self);
    fn focus_lost(&mut self);
    fn highlight(&self) -> usize;
    fn move_highlight(&mut self, delta: isize);
    fn option_labels(&self) -> Vec<&'static str>;
    fn region(&self) -> Region;
    fn set_region(&mut self, region: Region);
}

impl<T: Copy + PartialEq> DropdownControl for Dropdown<T> {
    fn is_open(&self) -> bool {
        Dropdown::is_open(self)
    }

    fn close(&mut self) {
        Dropdown::close(self)
    }

    fn focus_lost(&mut self) {
        Dropdown::focus_lost(self)
    }

    fn highlight(&self) -> usize {
        Dropdown::highlight(self)
    }

    fn move_highlight(&mut self, delta: isize) {
        Dropdown::move_highlight(self, delta)
    }

    fn option_labels(&self) -> Vec<&'static str> {
        self.options.iter().map(|o| o.label).collect()
    }

    fn region(&self) -> Region {
        Dropdown::region(self)
    }

    fn set_region(&mut self, region: Region) {
        Dropdown::set_region(self, region)
    }
}
