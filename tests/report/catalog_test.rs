use surplus::report::catalog::{
    filter_fields_for, list_reports, lookup, Aggregate, JoinSpec, Measure, Relation,
};
use surplus::report::{FilterField, FilterSignature, ReportEngine, ReportError, CATALOG};
use surplus::store::DatasetStore;

#[test]
fn test_list_reports_in_catalog_order() {
    let engine = ReportEngine::new(DatasetStore::new("unused.db"));
    assert_eq!(
        engine.list_reports(),
        vec![
            "Providers & Receivers per City",
            "Provider Type with Most Food",
            "Contact Info of Providers in City",
            "Receivers with Most Food Claims",
            "Total Food Quantity from All Providers",
            "City with Most Food Listings",
            "Most Common Food Types",
            "Claims per Food Item",
            "Provider with Most Successful Claims",
            "Claims Status Percentage",
            "Average Quantity Claimed per Receiver",
            "Most Claimed Meal Type",
            "Total Food Donated by Each Provider",
        ]
    );
}

#[test]
fn test_names_are_unique() {
    let mut names: Vec<String> = CATALOG
        .iter()
        .flat_map(|d| {
            [d.id, d.key]
                .into_iter()
                .chain(d.aliases.iter().copied())
                .map(str::to_lowercase)
        })
        .collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn test_every_name_resolves_to_its_report() {
    for descriptor in CATALOG.iter() {
        assert_eq!(lookup(descriptor.id).unwrap().id, descriptor.id);
        assert_eq!(lookup(descriptor.key).unwrap().id, descriptor.id);
        for alias in descriptor.aliases {
            assert_eq!(lookup(alias).unwrap().id, descriptor.id);
        }
    }
}

#[test]
fn test_short_names_are_aliases() {
    assert_eq!(
        lookup("Total Food Donated by Provider").unwrap().id,
        "Total Food Donated by Each Provider"
    );
    assert_eq!(
        lookup("  total food quantity ").unwrap().id,
        "Total Food Quantity from All Providers"
    );
}

#[test]
fn test_filter_fields() {
    assert_eq!(
        filter_fields_for("Providers & Receivers per City").unwrap(),
        &[FilterField::Location]
    );
    assert_eq!(
        filter_fields_for("Most Claimed Meal Type").unwrap(),
        &[
            FilterField::Location,
            FilterField::ProviderType,
            FilterField::FoodType,
            FilterField::MealType
        ]
    );
    assert!(matches!(
        filter_fields_for("Nope"),
        Err(ReportError::UnknownReport(_))
    ));
}

#[test]
fn test_eleven_reports_take_every_filter() {
    let full = CATALOG
        .iter()
        .filter(|d| d.signature == FilterSignature::Full)
        .count();
    assert_eq!(full, 11);
}

#[test]
fn test_full_signature_only_on_listing_shapes() {
    for descriptor in CATALOG.iter() {
        for &field in descriptor.filter_fields() {
            let column = descriptor
                .join
                .filter_column(field)
                .unwrap_or_else(|| panic!("{}: {} has no column", descriptor.id, field));
            if descriptor.signature == FilterSignature::Full {
                assert_eq!(column.relation, Relation::Listing, "{}", descriptor.id);
            }
        }
    }
}

#[test]
fn test_percentage_report_counts_all_claims() {
    let descriptor = lookup("Claims Status Percentage").unwrap();
    match descriptor.aggregate {
        Aggregate::Measures(measures) => assert_eq!(
            measures[0].measure,
            Measure::ShareOfAll {
                relation: Relation::Claim,
                places: 2
            }
        ),
        Aggregate::Project(_) => panic!("expected measures"),
    }
}

#[test]
fn test_join_shapes() {
    assert_eq!(
        JoinSpec::ClaimsWithReceiverAndListing.relations(),
        vec![Relation::Claim, Relation::Receiver, Relation::Listing]
    );
    assert_eq!(
        JoinSpec::ClaimsWithListingAndProvider.relations(),
        vec![Relation::Claim, Relation::Listing, Relation::Provider]
    );
    assert_eq!(JoinSpec::Providers.relations(), vec![Relation::Provider]);
}
