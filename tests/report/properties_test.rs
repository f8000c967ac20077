//! Properties that hold for every report in the catalog.

mod fixtures;

use fixtures::sample;
use surplus::report::catalog::lookup;
use surplus::report::compiler::{compile_params, lower};
use surplus::report::{
    FilterCriteria, FilterField, FilterSignature, MatchMode, QueryDescriptor, Value, CATALOG,
};
use surplus::sql::query::SortDir;
use surplus::sql::Dialect;

/// Criteria touching every combination of the four fields.
fn criteria_grid() -> Vec<FilterCriteria> {
    let values = [
        (FilterField::Location, "Austin"),
        (FilterField::ProviderType, "Grocery"),
        (FilterField::FoodType, "Veg"),
        (FilterField::MealType, "Lunch"),
    ];
    (0u8..16)
        .map(|mask| {
            values
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .fold(FilterCriteria::new(), |c, (_, (field, value))| {
                    c.with(*field, *value)
                })
        })
        .collect()
}

#[test]
fn test_empty_criteria_equal_unfiltered_query() {
    let fx = sample();

    for descriptor in CATALOG.iter() {
        let unfiltered = QueryDescriptor {
            signature: FilterSignature::None,
            ..*descriptor
        };
        let sql = lower(&unfiltered, MatchMode::Verbatim).to_sql(Dialect::Sqlite);
        let expected = fx.query(&sql, &[]);

        let actual = fx
            .engine
            .run_report(descriptor.id, &FilterCriteria::new())
            .unwrap();

        let mut expected_rows = expected.rows.clone();
        let mut actual_rows = actual.rows.clone();
        expected_rows.sort_by_key(|r| format!("{:?}", r));
        actual_rows.sort_by_key(|r| format!("{:?}", r));
        assert_eq!(actual_rows, expected_rows, "{}", descriptor.id);
        assert_eq!(actual.column_names(), expected.column_names());
    }
}

#[test]
fn test_output_columns_match_descriptor() {
    let fx = sample();
    for descriptor in CATALOG.iter() {
        let result = fx
            .engine
            .run_report(descriptor.id, &FilterCriteria::new())
            .unwrap();
        assert_eq!(result.column_names(), descriptor.output_columns(), "{}", descriptor.id);
    }
}

#[test]
fn test_substring_containment_on_group_keys() {
    let fx = sample();
    let cases = [
        ("City with Most Food Listings", FilterField::Location, "Aus", "City"),
        ("Most Common Food Types", FilterField::FoodType, "veg", "Food_Type"),
        ("Most Claimed Meal Type", FilterField::MealType, "n", "Meal_Type"),
        ("Provider Type with Most Food", FilterField::ProviderType, "store", "Provider_Type"),
        ("Contact Info of Providers in City", FilterField::Location, "DAL", "City"),
    ];

    for (report, field, needle, column) in cases {
        let result = fx
            .engine
            .run_report(report, &FilterCriteria::new().with(field, needle))
            .unwrap();
        assert!(!result.is_empty(), "{report}");
        for value in result.column_values(column) {
            let value = value.as_str().unwrap();
            assert!(
                value.to_lowercase().contains(&needle.to_lowercase()),
                "{report}: {value} does not contain {needle}"
            );
        }
    }
}

#[test]
fn test_records_lacking_the_value_never_contribute() {
    let fx = sample();

    // Listings in Dallas: Bread (Vegetarian) and Rice (Vegan).
    let result = fx
        .engine
        .run_report(
            "Most Common Food Types",
            &FilterCriteria::new().with_location("Dallas"),
        )
        .unwrap();
    let types: Vec<_> = result
        .column_values("Food_Type")
        .into_iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(types, vec!["Vegan", "Vegetarian"]);

    let filtered = fx
        .engine
        .run_report(
            "Total Food Donated by Provider",
            &FilterCriteria::new().with_location("Dallas"),
        )
        .unwrap();
    assert_eq!(filtered.column_values("Name"), vec![&Value::from("Bread Box")]);
}

#[test]
fn test_desc_reports_are_non_increasing() {
    let fx = sample();
    let ordered: Vec<_> = CATALOG
        .iter()
        .filter_map(|d| d.order.filter(|o| o.dir == SortDir::Desc).map(|o| (d, o.column)))
        .collect();
    assert_eq!(ordered.len(), 8);

    for criteria in criteria_grid() {
        for (descriptor, column) in &ordered {
            let result = fx.engine.run_report(descriptor.id, &criteria).unwrap();
            let measures: Vec<f64> = result
                .column_values(column)
                .into_iter()
                .map(|v| v.as_f64().unwrap_or(f64::NEG_INFINITY))
                .collect();
            assert!(
                measures.windows(2).all(|w| w[0] >= w[1]),
                "{}: {:?} under {:?}",
                descriptor.id,
                measures,
                criteria
            );
        }
    }
}

#[test]
fn test_runs_are_idempotent() {
    let fx = sample();
    let criteria = FilterCriteria::new().with_food_type("Veg");
    for descriptor in CATALOG.iter() {
        let first = fx.engine.run_report(descriptor.id, &criteria).unwrap();
        let second = fx.engine.run_report(descriptor.id, &criteria).unwrap();
        assert_eq!(first, second, "{}", descriptor.id);
    }
}

#[test]
fn test_percentages_use_unfiltered_denominator() {
    let fx = sample();

    let all = fx
        .engine
        .run_report("Claims Status Percentage", &FilterCriteria::new())
        .unwrap();
    let total: f64 = all
        .column_values("Percentage")
        .into_iter()
        .filter_map(Value::as_f64)
        .sum();
    assert!((total - 100.0).abs() < 0.02, "{total}");

    // Two of six claims are for food listed in Dallas, both completed.
    let dallas = fx
        .engine
        .run_report(
            "Claims Status Percentage",
            &FilterCriteria::new().with_location("Dallas"),
        )
        .unwrap();
    assert_eq!(dallas.len(), 1);
    assert_eq!(dallas.get(0, "Status"), Some(&Value::from("Completed")));
    let share = dallas.get(0, "Percentage").and_then(Value::as_f64).unwrap();
    assert!((share - 33.33).abs() < 1e-9, "{share}");
}

#[test]
fn test_param_count_matches_placeholders_for_all_criteria() {
    for descriptor in CATALOG.iter() {
        for mode in [MatchMode::Verbatim, MatchMode::Escaped] {
            let query = lower(descriptor, mode);
            for criteria in criteria_grid() {
                let params = compile_params(descriptor.filter_fields(), &criteria, mode);
                assert_eq!(params.len(), query.param_count(), "{}", descriptor.id);
                assert_eq!(params.len(), 2 * descriptor.filter_fields().len());
            }
        }
    }
}

#[test]
fn test_undeclared_fields_do_not_change_results() {
    let fx = sample();
    let descriptor = lookup("Providers & Receivers per City").unwrap();
    assert_eq!(descriptor.filter_fields(), &[FilterField::Location]);

    let base = FilterCriteria::new().with_location("Austin");
    let noisy = base
        .clone()
        .with_provider_type("zzz")
        .with_food_type("zzz")
        .with_meal_type("zzz");

    let a = fx.engine.run_report(descriptor.id, &base).unwrap();
    let b = fx.engine.run_report(descriptor.id, &noisy).unwrap();
    assert_eq!(a, b);
}
