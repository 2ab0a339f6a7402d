//! Calculator categories, used to group the catalogue for listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};

/// Grouping a calculator is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Unit conversions
    Conversion,
    /// Arithmetic, algebra and geometry
    Math,
    /// Body measurements
    Health,
    /// Loans, interest and bills
    Finance,
    /// Descriptive statistics over number lists
    Statistics,
    /// Calendar and clock arithmetic
    DateTime,
    /// Physical laws
    Physics,
    /// Dice, random numbers and passwords
    Random,
}

impl Category {
    /// All categories in listing order
    pub const ALL: [Category; 8] = [
        Category::Conversion,
        Category::Math,
        Category::Health,
        Category::Finance,
        Category::Statistics,
        Category::DateTime,
        Category::Physics,
        Category::Random,
    ];

    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Conversion => "Conversion",
            Category::Math => "Math",
            Category::Health => "Health & Fitness",
            Category::Finance => "Finance",
            Category::Statistics => "Statistics",
            Category::DateTime => "Date & Time",
            Category::Physics => "Physics",
            Category::Random => "Random",
        }
    }

    /// URL-safe identifier (also the serialized form)
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Conversion => "conversion",
            Category::Math => "math",
            Category::Health => "health",
            Category::Finance => "finance",
            Category::Statistics => "statistics",
            Category::DateTime => "date-time",
            Category::Physics => "physics",
            Category::Random => "random",
        }
    }

    /// Sort order for listing
    pub fn sort_order(&self) -> u8 {
        match self {
            Category::Conversion => 0,
            Category::Math => 1,
            Category::Health => 2,
            Category::Finance => 3,
            Category::Statistics => 4,
            Category::DateTime => 5,
            Category::Physics => 6,
            Category::Random => 7,
        }
    }

    /// Parse from a slug or display name, ignoring case and separators
    pub fn from_str_flexible(s: &str) -> CatalogResult<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "conversion" | "conversions" | "convert" => Ok(Category::Conversion),
            "math" | "maths" => Ok(Category::Math),
            "health" | "healthfitness" | "fitness" => Ok(Category::Health),
            "finance" | "financial" => Ok(Category::Finance),
            "statistics" | "stats" => Ok(Category::Statistics),
            "datetime" | "date" | "time" => Ok(Category::DateTime),
            "physics" => Ok(Category::Physics),
            "random" => Ok(Category::Random),
            _ => Err(CatalogError::unknown_category(s)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_str_flexible(s)
    }
}
