//! Fixed option catalogs for both assessment modules.
//!
//! Every enumerated field of the PD and GIS forms lives here together with
//! its display labels. Wire names are attached through serde attributes so
//! that the request bodies in [`crate::wire`] serialize without any manual
//! mapping.

use serde::{Deserialize, Serialize};

use crate::controls::DropdownOption;

/// Category of personal data processed by the information system.
///
/// Declaration order is the catalog order: it drives both display order and
/// the order of `selectedOptions` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssessmentCategory {
    Public,
    Special,
    Biometric,
    Other,
}

impl AssessmentCategory {
    pub const ALL: [AssessmentCategory; 4] = [
        AssessmentCategory::Public,
        AssessmentCategory::Special,
        AssessmentCategory::Biometric,
        AssessmentCategory::Other,
    ];

    /// Label shown to the user and sent to the classification service.
    pub fn label(self) -> &'static str {
        match self {
            AssessmentCategory::Public => "Общедоступные",
            AssessmentCategory::Special => "Специальные категории",
            AssessmentCategory::Biometric => "Биометрические",
            AssessmentCategory::Other => "Иные",
        }
    }

    pub fn index(self) -> usize {
        match self {
            AssessmentCategory::Public => 0,
            AssessmentCategory::Special => 1,
            AssessmentCategory::Biometric => 2,
            AssessmentCategory::Other => 3,
        }
    }
}

/// Number of data subjects whose records are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectCountBand {
    #[serde(rename = "lt")]
    Below100k,
    #[serde(rename = "gt")]
    Above100k,
}

impl SubjectCountBand {
    pub const OPTIONS: &'static [DropdownOption<SubjectCountBand>] = &[
        DropdownOption::new(SubjectCountBand::Below100k, "До 100 тыс."),
        DropdownOption::new(SubjectCountBand::Above100k, "Более 100 тыс."),
    ];
}

/// Certification status of the operating system or application software.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Certification {
    Certified,
    NotCertified,
}

impl Certification {
    /// Options for the operating system field (feminine agreement in labels).
    pub const OS_OPTIONS: &'static [DropdownOption<Certification>] = &[
        DropdownOption::new(Certification::Certified, "Сертифицирована"),
        DropdownOption::new(Certification::NotCertified, "Не сертифицирована"),
    ];

    /// Options for the application software field.
    pub const APP_OPTIONS: &'static [DropdownOption<Certification>] = &[
        DropdownOption::new(Certification::Certified, "Сертифицировано"),
        DropdownOption::new(Certification::NotCertified, "Не сертифицировано"),
    ];
}

/// Whether the system is isolated or connected to public networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "network")]
    Networked,
}

impl NetworkType {
    pub const OPTIONS: &'static [DropdownOption<NetworkType>] = &[
        DropdownOption::new(NetworkType::Local, "Локальная"),
        DropdownOption::new(NetworkType::Networked, "Сетевая (с выходом в сеть)"),
    ];
}

/// Significance level of the state information system (1 is the highest).
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum SecurityLevel {
    One,
    Two,
    Three,
}

impl SecurityLevel {
    pub const OPTIONS: &'static [DropdownOption<SecurityLevel>] = &[
        DropdownOption::new(SecurityLevel::One, "Уровень значимости 1"),
        DropdownOption::new(SecurityLevel::Two, "Уровень значимости 2"),
        DropdownOption::new(SecurityLevel::Three, "Уровень значимости 3"),
    ];

    pub fn number(self) -> u8 {
        match self {
            SecurityLevel::One => 1,
            SecurityLevel::Two => 2,
            SecurityLevel::Three => 3,
        }
    }

    /// Parse a level from its decimal form ("1".."3").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(SecurityLevel::One),
            "2" => Some(SecurityLevel::Two),
            "3" => Some(SecurityLevel::Three),
            _ => None,
        }
    }
}

impl From<SecurityLevel> for u8 {
    fn from(level: SecurityLevel) -> u8 {
        level.number()
    }
}

/// Territorial scale of the information system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scale {
    Object,
    Regional,
    Federal,
}

impl Scale {
    pub const OPTIONS: &'static [DropdownOption<Scale>] = &[
        DropdownOption::new(Scale::Object, "Объектовый"),
        DropdownOption::new(Scale::Regional, "Региональный"),
        DropdownOption::new(Scale::Federal, "Федеральный"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_index() {
        for (i, c) in AssessmentCategory::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert!(AssessmentCategory::Public < AssessmentCategory::Other);
    }

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_value(SubjectCountBand::Below100k).unwrap(), "lt");
        assert_eq!(serde_json::to_value(SubjectCountBand::Above100k).unwrap(), "gt");
        assert_eq!(serde_json::to_value(Certification::NotCertified).unwrap(), "not_certified");
        assert_eq!(serde_json::to_value(NetworkType::Networked).unwrap(), "network");
        assert_eq!(serde_json::to_value(Scale::Regional).unwrap(), "REGIONAL");
        assert_eq!(serde_json::to_value(SecurityLevel::Two).unwrap(), 2);
    }

    #[test]
    fn security_level_parse() {
        assert_eq!(SecurityLevel::parse("2"), Some(SecurityLevel::Two));
        assert_eq!(SecurityLevel::parse(" 3 "), Some(SecurityLevel::Three));
        assert_eq!(SecurityLevel::parse("4"), None);
        assert_eq!(SecurityLevel::parse(""), None);
    }
}
