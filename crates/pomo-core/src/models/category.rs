//! Interval categories.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of interval categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// Focused work
    Pomodoro,

    /// Rest between two pomodoros
    ShortBreak,

    /// Longer rest once the short break quota is used up
    LongBreak,
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pomodoro" => Ok(Category::Pomodoro),
            "ShortBreak" => Ok(Category::ShortBreak),
            "LongBreak" => Ok(Category::LongBreak),
            _ => Err(format!("Invalid interval category: {s}")),
        }
    }
}

impl Category {
    /// Storage representation, also used for summary filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pomodoro => "Pomodoro",
            Category::ShortBreak => "ShortBreak",
            Category::LongBreak => "LongBreak",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Category::ShortBreak | Category::LongBreak)
    }

    /// Whether this category matches a summary filter.
    ///
    /// Matching is a case-sensitive substring test. Surrounding `%`
    /// wildcards are stripped first, so `%Break` and `Break` select both
    /// break categories.
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.as_str().contains(filter.trim_matches('%'))
    }
}
