//! Product category.

use serde::{Deserialize, Serialize};

/// Shelf a product is sold from.
///
/// The catalog is small and the categories are fixed: everyday sweets,
/// savoury namkeens, and festival specials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.category", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sweets,
    Namkeens,
    Festival,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sweets => write!(f, "sweets"),
            Self::Namkeens => write!(f, "namkeens"),
            Self::Festival => write!(f, "festival"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sweets" => Ok(Self::Sweets),
            "namkeens" => Ok(Self::Namkeens),
            "festival" => Ok(Self::Festival),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Namkeens).unwrap(),
            "\"namkeens\""
        );
        let back: Category = serde_json::from_str("\"festival\"").unwrap();
        assert_eq!(back, Category::Festival);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("beverages".parse::<Category>().is_err());
        assert_eq!("sweets".parse::<Category>().unwrap(), Category::Sweets);
    }

    #[test]
    fn test_display_matches_from_str() {
        for category in [Category::Sweets, Category::Namkeens, Category::Festival] {
            assert_eq!(
                category.to_string().parse::<Category>().unwrap(),
                category
            );
        }
    }
}
