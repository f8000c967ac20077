//! The fixed report catalog.
//!
//! Each report is a [`QueryDescriptor`]: a join shape, an optional group key,
//! an aggregate, an optional fixed condition, an ordering and a filter
//! signature. Descriptors are plain data built from closed enums, so the
//! compiler lowers all thirteen reports through one code path.
//!
//! ```text
//! report id ──► QueryDescriptor ──► [compiler::lower] ──► Query ──► SQL
//!                     │
//!                     └──► FilterSignature ──► [compiler::compile_params] ──► bind values
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::sql::query::{JoinType, SortDir};
use crate::store::schema::{claims, food_listings, providers, receivers};

use super::error::{ReportError, ReportResult};
use super::filter::FilterField;

// ============================================================================
// Relations and columns
// ============================================================================

/// One of the four dataset tables, with the alias reports give it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Provider,
    Receiver,
    Listing,
    Claim,
}

impl Relation {
    pub fn table(&self) -> &'static str {
        match self {
            Relation::Provider => providers::TABLE,
            Relation::Receiver => receivers::TABLE,
            Relation::Listing => food_listings::TABLE,
            Relation::Claim => claims::TABLE,
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Relation::Provider => "p",
            Relation::Receiver => "r",
            Relation::Listing => "f",
            Relation::Claim => "c",
        }
    }
}

/// A column of one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub relation: Relation,
    pub name: &'static str,
}

const fn column(relation: Relation, name: &'static str) -> ColumnRef {
    ColumnRef { relation, name }
}

const PROVIDER_ID: ColumnRef = column(Relation::Provider, providers::ID);
const PROVIDER_NAME: ColumnRef = column(Relation::Provider, providers::NAME);
const PROVIDER_CONTACT: ColumnRef = column(Relation::Provider, providers::CONTACT);
const PROVIDER_CITY: ColumnRef = column(Relation::Provider, providers::CITY);

const RECEIVER_ID: ColumnRef = column(Relation::Receiver, receivers::ID);
const RECEIVER_NAME: ColumnRef = column(Relation::Receiver, receivers::NAME);
const RECEIVER_CITY: ColumnRef = column(Relation::Receiver, receivers::CITY);

const LISTING_ID: ColumnRef = column(Relation::Listing, food_listings::ID);
const LISTING_FOOD_NAME: ColumnRef = column(Relation::Listing, food_listings::FOOD_NAME);
const LISTING_QUANTITY: ColumnRef = column(Relation::Listing, food_listings::QUANTITY);
const LISTING_PROVIDER_ID: ColumnRef = column(Relation::Listing, food_listings::PROVIDER_ID);
const LISTING_PROVIDER_TYPE: ColumnRef = column(Relation::Listing, food_listings::PROVIDER_TYPE);
const LISTING_LOCATION: ColumnRef = column(Relation::Listing, food_listings::LOCATION);
const LISTING_FOOD_TYPE: ColumnRef = column(Relation::Listing, food_listings::FOOD_TYPE);
const LISTING_MEAL_TYPE: ColumnRef = column(Relation::Listing, food_listings::MEAL_TYPE);

const CLAIM_ID: ColumnRef = column(Relation::Claim, claims::ID);
const CLAIM_FOOD_ID: ColumnRef = column(Relation::Claim, claims::FOOD_ID);
const CLAIM_RECEIVER_ID: ColumnRef = column(Relation::Claim, claims::RECEIVER_ID);
const CLAIM_STATUS: ColumnRef = column(Relation::Claim, claims::STATUS);

// ============================================================================
// Join shapes
// ============================================================================

/// One join step: `<kind> JOIN relation ON left = right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinStep {
    pub kind: JoinType,
    pub relation: Relation,
    pub left: ColumnRef,
    pub right: ColumnRef,
}

/// The join shapes reports are built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSpec {
    /// `Providers p`
    Providers,
    /// `Providers p LEFT JOIN Receivers r ON p.City = r.City`
    ProvidersWithReceiversByCity,
    /// `Food_Listings f`
    Listings,
    /// `Food_Listings f JOIN Providers p`
    ListingsWithProvider,
    /// `Claims c JOIN Food_Listings f`
    ClaimsWithListing,
    /// `Claims c JOIN Receivers r JOIN Food_Listings f`
    ClaimsWithReceiverAndListing,
    /// `Claims c JOIN Food_Listings f JOIN Providers p`
    ClaimsWithListingAndProvider,
}

impl JoinSpec {
    /// The relation in the FROM clause.
    pub fn root(&self) -> Relation {
        match self {
            JoinSpec::Providers | JoinSpec::ProvidersWithReceiversByCity => Relation::Provider,
            JoinSpec::Listings | JoinSpec::ListingsWithProvider => Relation::Listing,
            JoinSpec::ClaimsWithListing
            | JoinSpec::ClaimsWithReceiverAndListing
            | JoinSpec::ClaimsWithListingAndProvider => Relation::Claim,
        }
    }

    /// Join steps after the root, in emission order.
    pub fn steps(&self) -> Vec<JoinStep> {
        let claim_listing = JoinStep {
            kind: JoinType::Inner,
            relation: Relation::Listing,
            left: CLAIM_FOOD_ID,
            right: LISTING_ID,
        };
        let listing_provider = JoinStep {
            kind: JoinType::Inner,
            relation: Relation::Provider,
            left: LISTING_PROVIDER_ID,
            right: PROVIDER_ID,
        };

        match self {
            JoinSpec::Providers | JoinSpec::Listings => vec![],
            JoinSpec::ProvidersWithReceiversByCity => vec![JoinStep {
                kind: JoinType::Left,
                relation: Relation::Receiver,
                left: PROVIDER_CITY,
                right: RECEIVER_CITY,
            }],
            JoinSpec::ListingsWithProvider => vec![listing_provider],
            JoinSpec::ClaimsWithListing => vec![claim_listing],
            JoinSpec::ClaimsWithReceiverAndListing => vec![
                JoinStep {
                    kind: JoinType::Inner,
                    relation: Relation::Receiver,
                    left: CLAIM_RECEIVER_ID,
                    right: RECEIVER_ID,
                },
                claim_listing,
            ],
            JoinSpec::ClaimsWithListingAndProvider => vec![claim_listing, listing_provider],
        }
    }

    /// All relations the shape brings into scope.
    pub fn relations(&self) -> Vec<Relation> {
        std::iter::once(self.root())
            .chain(self.steps().into_iter().map(|s| s.relation))
            .collect()
    }

    /// The column a filter field restricts within this shape.
    ///
    /// Shapes with a food listing filter on the listing's own columns.
    /// Provider-only shapes can only be filtered by location, on the
    /// provider's city.
    pub fn filter_column(&self, field: FilterField) -> Option<ColumnRef> {
        if self.relations().contains(&Relation::Listing) {
            return Some(match field {
                FilterField::Location => LISTING_LOCATION,
                FilterField::ProviderType => LISTING_PROVIDER_TYPE,
                FilterField::FoodType => LISTING_FOOD_TYPE,
                FilterField::MealType => LISTING_MEAL_TYPE,
            });
        }
        match field {
            FilterField::Location => Some(PROVIDER_CITY),
            _ => None,
        }
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// A single output measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// `SUM(column)`
    Sum(ColumnRef),
    /// `AVG(column)`
    Avg(ColumnRef),
    /// `COUNT(*)`
    CountRows,
    /// `COUNT(column)`
    Count(ColumnRef),
    /// `COUNT(DISTINCT column)`
    CountDistinct(ColumnRef),
    /// `ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM relation), places)`.
    ///
    /// The denominator counts the whole relation and ignores filters, so
    /// shares under an active filter do not sum to 100.
    ShareOfAll { relation: Relation, places: u8 },
}

/// A measure with its output column name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureSpec {
    pub measure: Measure,
    pub alias: &'static str,
}

/// What a report selects besides its group key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    /// Aggregated measures, one row per group (or one row overall).
    Measures(&'static [MeasureSpec]),
    /// Plain column projection, one row per source row.
    Project(&'static [ColumnRef]),
}

/// Group key with its output column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupKey {
    pub column: ColumnRef,
    pub alias: &'static str,
}

const fn group(column: ColumnRef, alias: &'static str) -> GroupKey {
    GroupKey { column, alias }
}

/// A fixed predicate applied before the caller's filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// `column = 'literal'`
    Equals(ColumnRef, &'static str),
}

/// Ordering on an output column.
///
/// Grouped reports additionally break ties on the group key ascending so
/// repeated runs return rows in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
    pub column: &'static str,
    pub dir: SortDir,
}

const fn desc(column: &'static str) -> Option<OrderSpec> {
    Some(OrderSpec {
        column,
        dir: SortDir::Desc,
    })
}

// ============================================================================
// Filter signatures
// ============================================================================

/// Which filter fields a report consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSignature {
    /// No filter inputs.
    None,
    /// Location only.
    LocationOnly,
    /// Location, provider type, food type and meal type.
    Full,
}

impl FilterSignature {
    /// Declared fields in canonical order.
    pub fn fields(&self) -> &'static [FilterField] {
        match self {
            FilterSignature::None => &[],
            FilterSignature::LocationOnly => &[FilterField::Location],
            FilterSignature::Full => &FilterField::ALL,
        }
    }

    /// Bind parameters the signature compiles to: a pair per field.
    pub fn param_count(&self) -> usize {
        self.fields().len() * 2
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// Static definition of one catalog report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryDescriptor {
    /// Display name, unique within the catalog.
    pub id: &'static str,
    /// Kebab-case key for command-line use.
    pub key: &'static str,
    /// Alternative names that resolve to this report.
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub signature: FilterSignature,
    pub join: JoinSpec,
    pub group: Option<GroupKey>,
    pub aggregate: Aggregate,
    pub condition: Option<Condition>,
    pub order: Option<OrderSpec>,
}

impl QueryDescriptor {
    /// Filter fields this report consumes, in canonical order.
    pub fn filter_fields(&self) -> &'static [FilterField] {
        self.signature.fields()
    }

    /// Output column names, in order.
    pub fn output_columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = self.group.iter().map(|g| g.alias).collect();
        match self.aggregate {
            Aggregate::Measures(measures) => columns.extend(measures.iter().map(|m| m.alias)),
            Aggregate::Project(projected) => columns.extend(projected.iter().map(|c| c.name)),
        }
        columns
    }

    fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.id.eq_ignore_ascii_case(name)
            || self.key.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Every report, in presentation order.
pub static CATALOG: [QueryDescriptor; 13] = [
    QueryDescriptor {
        id: "Providers & Receivers per City",
        key: "providers-receivers-per-city",
        aliases: &[],
        description: "Distinct providers and receivers located in each provider city",
        signature: FilterSignature::LocationOnly,
        join: JoinSpec::ProvidersWithReceiversByCity,
        group: Some(group(PROVIDER_CITY, "City")),
        aggregate: Aggregate::Measures(&[
            MeasureSpec {
                measure: Measure::CountDistinct(PROVIDER_ID),
                alias: "Providers",
            },
            MeasureSpec {
                measure: Measure::CountDistinct(RECEIVER_ID),
                alias: "Receivers",
            },
        ]),
        condition: None,
        order: None,
    },
    QueryDescriptor {
        id: "Provider Type with Most Food",
        key: "provider-type-most-food",
        aliases: &[],
        description: "Total listed quantity per provider type",
        signature: FilterSignature::Full,
        join: JoinSpec::Listings,
        group: Some(group(LISTING_PROVIDER_TYPE, "Provider_Type")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::Sum(LISTING_QUANTITY),
            alias: "Total_Quantity",
        }]),
        condition: None,
        order: desc("Total_Quantity"),
    },
    QueryDescriptor {
        id: "Contact Info of Providers in City",
        key: "provider-contacts",
        aliases: &[],
        description: "Name, contact and city of every provider",
        signature: FilterSignature::LocationOnly,
        join: JoinSpec::Providers,
        group: None,
        aggregate: Aggregate::Project(&[PROVIDER_NAME, PROVIDER_CONTACT, PROVIDER_CITY]),
        condition: None,
        order: None,
    },
    QueryDescriptor {
        id: "Receivers with Most Food Claims",
        key: "receivers-most-claims",
        aliases: &[],
        description: "Total claimed quantity per receiver",
        signature: FilterSignature::Full,
        join: JoinSpec::ClaimsWithReceiverAndListing,
        group: Some(group(RECEIVER_NAME, "Name")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::Sum(LISTING_QUANTITY),
            alias: "Total_Claimed",
        }]),
        condition: None,
        order: desc("Total_Claimed"),
    },
    QueryDescriptor {
        id: "Total Food Quantity from All Providers",
        key: "total-food-quantity",
        aliases: &["Total Food Quantity"],
        description: "Sum of all listed quantities",
        signature: FilterSignature::Full,
        join: JoinSpec::Listings,
        group: None,
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::Sum(LISTING_QUANTITY),
            alias: "Total_Food_Quantity",
        }]),
        condition: None,
        order: None,
    },
    QueryDescriptor {
        id: "City with Most Food Listings",
        key: "city-most-listings",
        aliases: &[],
        description: "Number of food listings per city",
        signature: FilterSignature::Full,
        join: JoinSpec::Listings,
        group: Some(group(LISTING_LOCATION, "City")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::CountRows,
            alias: "Listings",
        }]),
        condition: None,
        order: desc("Listings"),
    },
    QueryDescriptor {
        id: "Most Common Food Types",
        key: "food-types",
        aliases: &[],
        description: "Number of listings per food type",
        signature: FilterSignature::Full,
        join: JoinSpec::Listings,
        group: Some(group(LISTING_FOOD_TYPE, "Food_Type")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::CountRows,
            alias: "Count",
        }]),
        condition: None,
        order: desc("Count"),
    },
    QueryDescriptor {
        id: "Claims per Food Item",
        key: "claims-per-food",
        aliases: &[],
        description: "Number of claims per food item name",
        signature: FilterSignature::Full,
        join: JoinSpec::ClaimsWithListing,
        group: Some(group(LISTING_FOOD_NAME, "Food_Name")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::Count(CLAIM_ID),
            alias: "Claims_Count",
        }]),
        condition: None,
        order: desc("Claims_Count"),
    },
    QueryDescriptor {
        id: "Provider with Most Successful Claims",
        key: "provider-successful-claims",
        aliases: &[],
        description: "Completed claims per provider",
        signature: FilterSignature::Full,
        join: JoinSpec::ClaimsWithListingAndProvider,
        group: Some(group(PROVIDER_NAME, "Name")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::Count(CLAIM_ID),
            alias: "Successful_Claims",
        }]),
        condition: Some(Condition::Equals(CLAIM_STATUS, claims::STATUS_COMPLETED)),
        order: desc("Successful_Claims"),
    },
    QueryDescriptor {
        id: "Claims Status Percentage",
        key: "claim-status-share",
        aliases: &[],
        description: "Share of all claims in each status",
        signature: FilterSignature::Full,
        join: JoinSpec::ClaimsWithListing,
        group: Some(group(CLAIM_STATUS, "Status")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::ShareOfAll {
                relation: Relation::Claim,
                places: 2,
            },
            alias: "Percentage",
        }]),
        condition: None,
        order: None,
    },
    QueryDescriptor {
        id: "Average Quantity Claimed per Receiver",
        key: "avg-claimed-per-receiver",
        aliases: &[],
        description: "Mean claimed quantity per receiver",
        signature: FilterSignature::Full,
        join: JoinSpec::ClaimsWithReceiverAndListing,
        group: Some(group(RECEIVER_NAME, "Name")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::Avg(LISTING_QUANTITY),
            alias: "Avg_Quantity_Claimed",
        }]),
        condition: None,
        order: None,
    },
    QueryDescriptor {
        id: "Most Claimed Meal Type",
        key: "meal-types",
        aliases: &[],
        description: "Number of claims per meal type",
        signature: FilterSignature::Full,
        join: JoinSpec::ClaimsWithListing,
        group: Some(group(LISTING_MEAL_TYPE, "Meal_Type")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::CountRows,
            alias: "Claim_Count",
        }]),
        condition: None,
        order: desc("Claim_Count"),
    },
    QueryDescriptor {
        id: "Total Food Donated by Each Provider",
        key: "donated-per-provider",
        aliases: &["Total Food Donated by Provider"],
        description: "Total listed quantity per provider",
        signature: FilterSignature::Full,
        join: JoinSpec::ListingsWithProvider,
        group: Some(group(PROVIDER_NAME, "Name")),
        aggregate: Aggregate::Measures(&[MeasureSpec {
            measure: Measure::Sum(LISTING_QUANTITY),
            alias: "Total_Donated",
        }]),
        condition: None,
        order: desc("Total_Donated"),
    },
];

/// Lowercased id, key and alias → catalog position.
static INDEX: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (i, descriptor) in CATALOG.iter().enumerate() {
        let names = [descriptor.id, descriptor.key]
            .into_iter()
            .chain(descriptor.aliases.iter().copied());
        for name in names {
            index.insert(name.to_lowercase(), i);
        }
    }
    index
});

/// Report ids in catalog order.
pub fn list_reports() -> Vec<&'static str> {
    CATALOG.iter().map(|d| d.id).collect()
}

/// Resolve a report by id, key or alias (ASCII case-insensitive).
pub fn lookup(name: &str) -> ReportResult<&'static QueryDescriptor> {
    INDEX
        .get(&name.trim().to_lowercase())
        .map(|&i| &CATALOG[i])
        .filter(|d| d.matches(name))
        .ok_or_else(|| ReportError::UnknownReport(name.to_string()))
}

/// Filter fields a report consumes.
pub fn filter_fields_for(name: &str) -> ReportResult<&'static [FilterField]> {
    lookup(name).map(|d| d.filter_fields())
}
