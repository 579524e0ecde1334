use serde::Serialize;

/// Urgency bucket derived solely from `days_left`. Ordering follows urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Expired,
    Critical,
    ExtensionNeeded,
    LongTerm,
}

impl PriorityTier {
    pub const CRITICAL_MAX_DAYS: i64 = 30;
    pub const EXTENSION_MAX_DAYS: i64 = 180;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::Expired,
            Self::Critical,
            Self::ExtensionNeeded,
            Self::LongTerm,
        ]
    }

    pub const fn from_days_left(days_left: i64) -> Self {
        if days_left < 0 {
            Self::Expired
        } else if days_left <= Self::CRITICAL_MAX_DAYS {
            Self::Critical
        } else if days_left <= Self::EXTENSION_MAX_DAYS {
            Self::ExtensionNeeded
        } else {
            Self::LongTerm
        }
    }

    /// 1 for the most urgent tier through 4 for the least.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Expired => 1,
            Self::Critical => 2,
            Self::ExtensionNeeded => 3,
            Self::LongTerm => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired/Overdue",
            Self::Critical => "Critical",
            Self::ExtensionNeeded => "Extension Needed",
            Self::LongTerm => "Long-term",
        }
    }
}
