//! Dialing codes offered by the country selector.

use serde::Serialize;
use std::fmt;

/// A selectable (dialing code, country) pair.
///
/// Codes are not unique: USA and Canada both dial `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CountryCode {
    /// Dialing code including the leading `+`
    pub code: &'static str,

    /// Country name shown in the selector
    pub label: &'static str,

    /// Flag emoji shown next to the code
    pub flag: &'static str,
}

/// Every selectable country, in display order.
pub const COUNTRY_CODES: &[CountryCode] = &[
    CountryCode {
        code: "+1",
        label: "USA",
        flag: "🇺🇸",
    },
    CountryCode {
        code: "+44",
        label: "UK",
        flag: "🇬🇧",
    },
    CountryCode {
        code: "+1",
        label: "Canada",
        flag: "🇨🇦",
    },
    CountryCode {
        code: "+61",
        label: "Australia",
        flag: "🇦🇺",
    },
    CountryCode {
        code: "+49",
        label: "Germany",
        flag: "🇩🇪",
    },
    CountryCode {
        code: "+33",
        label: "France",
        flag: "🇫🇷",
    },
    CountryCode {
        code: "+91",
        label: "India",
        flag: "🇮🇳",
    },
    CountryCode {
        code: "+81",
        label: "Japan",
        flag: "🇯🇵",
    },
    CountryCode {
        code: "+86",
        label: "China",
        flag: "🇨🇳",
    },
    CountryCode {
        code: "+55",
        label: "Brazil",
        flag: "🇧🇷",
    },
    CountryCode {
        code: "+52",
        label: "Mexico",
        flag: "🇲🇽",
    },
    CountryCode {
        code: "+34",
        label: "Spain",
        flag: "🇪🇸",
    },
    CountryCode {
        code: "+39",
        label: "Italy",
        flag: "🇮🇹",
    },
    CountryCode {
        code: "+7",
        label: "Russia",
        flag: "🇷🇺",
    },
    CountryCode {
        code: "+27",
        label: "South Africa",
        flag: "🇿🇦",
    },
    CountryCode {
        code: "+971",
        label: "UAE",
        flag: "🇦🇪",
    },
    CountryCode {
        code: "+65",
        label: "Singapore",
        flag: "🇸🇬",
    },
    CountryCode {
        code: "+82",
        label: "South Korea",
        flag: "🇰🇷",
    },
];

impl CountryCode {
    /// First entry whose dialing code matches.
    ///
    /// For `+1` this is always USA; use [`CountryCode::by_label`] to pick Canada.
    pub fn by_code(code: &str) -> Option<Self> {
        COUNTRY_CODES.iter().copied().find(|c| c.code == code)
    }

    /// Entry with the given label, compared case-insensitively.
    pub fn by_label(label: &str) -> Option<Self> {
        COUNTRY_CODES
            .iter()
            .copied()
            .find(|c| c.label.eq_ignore_ascii_case(label))
    }

    /// All entries, in display order.
    pub fn all() -> &'static [CountryCode] {
        COUNTRY_CODES
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        COUNTRY_CODES[0]
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.flag, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plus_one() {
        let default = CountryCode::default();
        assert_eq!(default.code, "+1");
        assert_eq!(default.label, "USA");
    }

    #[test]
    fn test_required_codes_present() {
        let required = [
            "+1", "+44", "+61", "+49", "+33", "+91", "+81", "+86", "+55", "+52", "+34", "+39",
            "+7", "+27", "+971", "+65", "+82",
        ];
        for code in required {
            assert!(CountryCode::by_code(code).is_some(), "missing {}", code);
        }
    }

    #[test]
    fn test_duplicate_plus_one_kept() {
        let plus_one: Vec<_> = CountryCode::all()
            .iter()
            .filter(|c| c.code == "+1")
            .map(|c| c.label)
            .collect();
        assert_eq!(plus_one, vec!["USA", "Canada"]);
        assert_eq!(CountryCode::all().len(), 18);
    }

    #[test]
    fn test_lookup_by_label() {
        let canada = CountryCode::by_label("canada").unwrap();
        assert_eq!(canada.code, "+1");
        assert_ne!(canada, CountryCode::default());
        assert!(CountryCode::by_label("Atlantis").is_none());
        assert!(CountryCode::by_code("+999").is_none());
    }

    #[test]
    fn test_display() {
        let uk = CountryCode::by_code("+44").unwrap();
        assert_eq!(uk.to_string(), "🇬🇧 +44");
    }
}
