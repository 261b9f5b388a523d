//! Classification results and the view model used to display them.
//!
//! Measures arrive grouped by section label. The group keeps the sections in
//! the order the service sent them; that order is the display order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::controls::Disclosure;

/// A single compliance requirement returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MeasureItem {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "levels", default)]
    pub applicable_levels: Vec<String>,
}

impl MeasureItem {
    /// Applicable levels joined for display.
    pub fn levels_display(&self) -> String {
        self.applicable_levels.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureSection {
    pub label: String,
    pub items: Vec<MeasureItem>,
}

/// Measures bucketed by section label, in service-defined order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasureGroup {
    sections: Vec<MeasureSection>,
}

impl MeasureGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section. A repeated label replaces the earlier section's items
    /// but keeps its position.
    pub fn insert(&mut self, label: impl Into<String>, items: Vec<MeasureItem>) {
        let label = label.into();
        match self.sections.iter_mut().find(|s| s.label == label) {
            Some(existing) => existing.items = items,
            None => self.sections.push(MeasureSection { label, items }),
        }
    }

    pub fn sections(&self) -> &[MeasureSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'de> Deserialize<'de> for MeasureGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupVisitor;

        impl<'de> Visitor<'de> for GroupVisitor {
            type Value = MeasureGroup;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section label to a list of measures")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut group = MeasureGroup::new();
                while let Some((label, items)) = map.next_entry::<String, Vec<MeasureItem>>()? {
                    group.insert(label, items);
                }
                Ok(group)
            }
        }

        deserializer.deserialize_map(GroupVisitor)
    }
}

/// Personal-data module result: protection level plus explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub level: String,
    pub reason: String,
    pub measures: MeasureGroup,
}

/// GIS module result: protection class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionClassResult {
    pub protection_class: String,
    pub measures: MeasureGroup,
}

/// Anything that carries a measure group.
pub trait HasMeasures {
    fn measures(&self) -> &MeasureGroup;
}

impl HasMeasures for ClassificationResult {
    fn measures(&self) -> &MeasureGroup {
        &self.measures
    }
}

impl HasMeasures for ProtectionClassResult {
    fn measures(&self) -> &MeasureGroup {
        &self.measures
    }
}

/// A result together with one disclosure panel per measure section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView<R> {
    result: R,
    panels: Vec<Disclosure>,
}

impl<R: HasMeasures> ResultView<R> {
    pub fn new(result: R) -> Self {
        let panels = result
            .measures()
            .sections()
            .iter()
            .map(|s| Disclosure::new(s.label.clone()))
            .collect();
        Self { result, panels }
    }

    pub fn result(&self) -> &R {
        &self.result
    }

    pub fn panels(&self) -> &[Disclosure] {
        &self.panels
    }

    /// Panels zipped with the section they disclose, in display order.
    pub fn sections(&self) -> impl Iterator<Item = (&Disclosure, &MeasureSection)> {
        self.panels
            .iter()
            .zip(self.result.measures().sections().iter())
    }

    /// Toggle panel `index`. Returns false when there is no such panel.
    pub fn toggle_panel(&mut self, index: usize) -> bool {
        match self.panels.get_mut(index) {
            Some(panel) => {
                panel.toggle();
                true
            }
            None => false,
        }
    }
}
