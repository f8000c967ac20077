//! Filter criteria supplied by the caller for one report run.
//!
//! Every field is a plain string. An empty string means "do not restrict on
//! this field"; anything else is matched as a substring of the mapped column.

use serde::{Deserialize, Serialize};

/// One of the four filterable dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Location,
    ProviderType,
    FoodType,
    MealType,
}

impl FilterField {
    /// All fields in canonical order. Parameter pairs are always emitted in
    /// this order, truncated to a report's declared subset.
    pub const ALL: [FilterField; 4] = [
        FilterField::Location,
        FilterField::ProviderType,
        FilterField::FoodType,
        FilterField::MealType,
    ];

    /// Snake-case name, used in config, JSON and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Location => "location",
            FilterField::ProviderType => "provider_type",
            FilterField::FoodType => "food_type",
            FilterField::MealType => "meal_type",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Location => "City",
            FilterField::ProviderType => "Provider Type",
            FilterField::FoodType => "Food Type",
            FilterField::MealType => "Meal Type",
        }
    }

    /// Parse a field name. Accepts snake-case and kebab-case.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "location" | "city" => Some(FilterField::Location),
            "provider_type" => Some(FilterField::ProviderType),
            "food_type" => Some(FilterField::FoodType),
            "meal_type" => Some(FilterField::MealType),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request substring constraints.
///
/// Values are taken verbatim: no trimming, no validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub location: String,
    pub provider_type: String,
    pub food_type: String,
    pub meal_type: String,
}

impl FilterCriteria {
    /// Criteria that restrict nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, value: impl Into<String>) -> Self {
        self.location = value.into();
        self
    }

    pub fn with_provider_type(mut self, value: impl Into<String>) -> Self {
        self.provider_type = value.into();
        self
    }

    pub fn with_food_type(mut self, value: impl Into<String>) -> Self {
        self.food_type = value.into();
        self
    }

    pub fn with_meal_type(mut self, value: impl Into<String>) -> Self {
        self.meal_type = value.into();
        self
    }

    /// Set a field by enum tag.
    pub fn with(self, field: FilterField, value: impl Into<String>) -> Self {
        match field {
            FilterField::Location => self.with_location(value),
            FilterField::ProviderType => self.with_provider_type(value),
            FilterField::FoodType => self.with_food_type(value),
            FilterField::MealType => self.with_meal_type(value),
        }
    }

    /// Build criteria from optional values, treating `None` as unrestricted.
    pub fn from_options(
        location: Option<String>,
        provider_type: Option<String>,
        food_type: Option<String>,
        meal_type: Option<String>,
    ) -> Self {
        Self {
            location: location.unwrap_or_default(),
            provider_type: provider_type.unwrap_or_default(),
            food_type: food_type.unwrap_or_default(),
            meal_type: meal_type.unwrap_or_default(),
        }
    }

    /// The raw value for a field.
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Location => &self.location,
            FilterField::ProviderType => &self.provider_type,
            FilterField::FoodType => &self.food_type,
            FilterField::MealType => &self.meal_type,
        }
    }

    /// Whether the field matches everything.
    pub fn is_unrestricted(&self, field: FilterField) -> bool {
        self.value(field).is_empty()
    }

    /// Fields carrying a non-empty value, in canonical order.
    pub fn active_fields(&self) -> Vec<FilterField> {
        FilterField::ALL
            .into_iter()
            .filter(|f| !self.is_unrestricted(*f))
            .collect()
    }
}
