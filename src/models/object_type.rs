use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    #[default]
    Office,
    Apartment,
    House,
    Warehouse,
    Retail,
    Industrial,
    Other,
}

impl ObjectType {
    pub const ALL: [ObjectType; 7] = [
        ObjectType::Office,
        ObjectType::Apartment,
        ObjectType::House,
        ObjectType::Warehouse,
        ObjectType::Retail,
        ObjectType::Industrial,
        ObjectType::Other,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ObjectType::Office => "office",
            ObjectType::Apartment => "apartment",
            ObjectType::House => "house",
            ObjectType::Warehouse => "warehouse",
            ObjectType::Retail => "retail",
            ObjectType::Industrial => "industrial",
            ObjectType::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        ObjectType::ALL.into_iter().find(|t| t.to_db_str() == s)
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        ObjectType::from_db_str(&code.trim().to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ObjectType::Office => "Office",
            ObjectType::Apartment => "Apartment",
            ObjectType::House => "House",
            ObjectType::Warehouse => "Warehouse",
            ObjectType::Retail => "Retail",
            ObjectType::Industrial => "Industrial",
            ObjectType::Other => "Other",
        }
    }
}
