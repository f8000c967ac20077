//! Physical names of the dataset tables and the columns reports read.
//!
//! The store is owned elsewhere; these names must match whatever loaded it.

pub mod providers {
    pub const TABLE: &str = "Providers";
    pub const ID: &str = "Provider_ID";
    pub const NAME: &str = "Name";
    pub const CONTACT: &str = "Contact";
    pub const CITY: &str = "City";
}

pub mod receivers {
    pub const TABLE: &str = "Receivers";
    pub const ID: &str = "Receiver_ID";
    pub const NAME: &str = "Name";
    pub const CITY: &str = "City";
}

pub mod food_listings {
    pub const TABLE: &str = "Food_Listings";
    pub const ID: &str = "Food_ID";
    pub const FOOD_NAME: &str = "Food_Name";
    pub const QUANTITY: &str = "Quantity";
    pub const PROVIDER_ID: &str = "Provider_ID";
    pub const PROVIDER_TYPE: &str = "Provider_Type";
    pub const LOCATION: &str = "Location";
    pub const FOOD_TYPE: &str = "Food_Type";
    pub const MEAL_TYPE: &str = "Meal_Type";
}

pub mod claims {
    pub const TABLE: &str = "Claims";
    pub const ID: &str = "Claim_ID";
    pub const FOOD_ID: &str = "Food_ID";
    pub const RECEIVER_ID: &str = "Receiver_ID";
    pub const STATUS: &str = "Status";

    /// Status value of a claim that was picked up.
    pub const STATUS_COMPLETED: &str = "Completed";
}

/// DDL for an empty dataset with the layout the reports expect.
///
/// Printed by `surplus schema` for whoever loads the data. Columns the
/// reports never read (address, expiry date, timestamps) are included so a
/// full CSV export loads without reshaping.
pub const CREATE_TABLES: &str = r#"CREATE TABLE IF NOT EXISTS "Providers" (
    "Provider_ID" INTEGER PRIMARY KEY,
    "Name" TEXT NOT NULL,
    "Type" TEXT,
    "Address" TEXT,
    "City" TEXT,
    "Contact" TEXT
);

CREATE TABLE IF NOT EXISTS "Receivers" (
    "Receiver_ID" INTEGER PRIMARY KEY,
    "Name" TEXT NOT NULL,
    "Type" TEXT,
    "City" TEXT,
    "Contact" TEXT
);

CREATE TABLE IF NOT EXISTS "Food_Listings" (
    "Food_ID" INTEGER PRIMARY KEY,
    "Food_Name" TEXT,
    "Quantity" INTEGER NOT NULL CHECK ("Quantity" > 0),
    "Expiry_Date" TEXT,
    "Provider_ID" INTEGER NOT NULL REFERENCES "Providers" ("Provider_ID"),
    "Provider_Type" TEXT,
    "Location" TEXT,
    "Food_Type" TEXT,
    "Meal_Type" TEXT
);

CREATE TABLE IF NOT EXISTS "Claims" (
    "Claim_ID" INTEGER PRIMARY KEY,
    "Food_ID" INTEGER NOT NULL REFERENCES "Food_Listings" ("Food_ID"),
    "Receiver_ID" INTEGER NOT NULL REFERENCES "Receivers" ("Receiver_ID"),
    "Status" TEXT,
    "Timestamp" TEXT
);
"#;
