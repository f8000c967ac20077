//! Rendered SQL for catalog reports.

use insta::assert_snapshot;
use sqlparser::dialect::{PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;
use surplus::report::catalog::lookup;
use surplus::report::compiler::{compile, filter_predicate, lower};
use surplus::report::{FilterCriteria, MatchMode, CATALOG};
use surplus::sql::{table_col, Dialect};

fn sql_for(report: &str, dialect: Dialect) -> String {
    lower(lookup(report).unwrap(), MatchMode::Verbatim).to_sql(dialect)
}

#[test]
fn test_total_food_quantity_sql() {
    let sql = sql_for("Total Food Quantity", Dialect::Sqlite);
    assert_snapshot!(sql, @r#"
    SELECT
      SUM("f"."Quantity") AS "Total_Food_Quantity"
    FROM "Food_Listings" AS "f"
    WHERE (? = '' OR "f"."Location" LIKE ?) AND (? = '' OR "f"."Provider_Type" LIKE ?) AND (? = '' OR "f"."Food_Type" LIKE ?) AND (? = '' OR "f"."Meal_Type" LIKE ?)
    "#);
}

#[test]
fn test_successful_claims_sql_postgres() {
    let sql = sql_for("Provider with Most Successful Claims", Dialect::Postgres);
    assert_snapshot!(sql, @r#"
    SELECT
      "p"."Name" AS "Name",
      COUNT("c"."Claim_ID") AS "Successful_Claims"
    FROM "Claims" AS "c"
    INNER JOIN "Food_Listings" AS "f" ON "c"."Food_ID" = "f"."Food_ID"
    INNER JOIN "Providers" AS "p" ON "f"."Provider_ID" = "p"."Provider_ID"
    WHERE "c"."Status" = 'Completed' AND ($1 = '' OR "f"."Location" ILIKE $2) AND ($3 = '' OR "f"."Provider_Type" ILIKE $4) AND ($5 = '' OR "f"."Food_Type" ILIKE $6) AND ($7 = '' OR "f"."Meal_Type" ILIKE $8)
    GROUP BY "p"."Name"
    ORDER BY "Successful_Claims" DESC, "p"."Name" ASC
    "#);
}

#[test]
fn test_providers_per_city_sql() {
    let sql = sql_for("Providers & Receivers per City", Dialect::Sqlite);
    assert_snapshot!(sql, @r#"
    SELECT
      "p"."City" AS "City",
      COUNT(DISTINCT "p"."Provider_ID") AS "Providers",
      COUNT(DISTINCT "r"."Receiver_ID") AS "Receivers"
    FROM "Providers" AS "p"
    LEFT JOIN "Receivers" AS "r" ON "p"."City" = "r"."City"
    WHERE (? = '' OR "p"."City" LIKE ?)
    GROUP BY "p"."City"
    "#);
}

#[test]
fn test_all_reports_parse() {
    for descriptor in CATALOG.iter() {
        let sqlite = lower(descriptor, MatchMode::Verbatim).to_sql(Dialect::Sqlite);
        Parser::parse_sql(&SQLiteDialect {}, &sqlite)
            .unwrap_or_else(|e| panic!("{}: {}\n{}", descriptor.id, e, sqlite));

        let postgres = lower(descriptor, MatchMode::Verbatim).to_sql(Dialect::Postgres);
        Parser::parse_sql(&PostgreSqlDialect {}, &postgres)
            .unwrap_or_else(|e| panic!("{}: {}\n{}", descriptor.id, e, postgres));
    }
}

#[test]
fn test_every_filter_is_an_optional_pair() {
    for descriptor in CATALOG.iter() {
        let sql = lower(descriptor, MatchMode::Verbatim).to_sql(Dialect::Sqlite);
        assert_eq!(
            sql.matches("(? = '' OR ").count(),
            descriptor.filter_fields().len(),
            "{}",
            descriptor.id
        );
    }
}

#[test]
fn test_compile_binds_substring_patterns() {
    let descriptor = lookup("Most Claimed Meal Type").unwrap();
    let compiled = compile(
        descriptor,
        &FilterCriteria::new().with_food_type("Vegan"),
        MatchMode::Verbatim,
    )
    .unwrap();

    assert_eq!(compiled.placeholder_count(), 8);
    assert_eq!(
        compiled.params,
        vec!["", "%%", "", "%%", "Vegan", "%Vegan%", "", "%%"]
    );
}

#[test]
fn test_filter_predicate_modes() {
    let column = table_col("f", "Food_Type");

    let verbatim = filter_predicate(column.clone(), MatchMode::Verbatim);
    assert_eq!(
        verbatim.to_tokens().serialize(Dialect::Sqlite),
        r#"(? = '' OR "f"."Food_Type" LIKE ?)"#
    );

    let escaped = filter_predicate(column, MatchMode::Escaped);
    assert_eq!(
        escaped.to_tokens().serialize(Dialect::Sqlite),
        r#"(? = '' OR "f"."Food_Type" LIKE ? ESCAPE '\')"#
    );
}
