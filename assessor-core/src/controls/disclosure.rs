//! Expand/collapse container for one titled block of content.

/// A titled panel whose body is shown only while open. Starts closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    title: String,
    is_open: bool,
}

impl Disclosure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_open: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}
