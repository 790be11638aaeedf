//! Contact directory and import tests
//!
//! Covers the merged contact ordering, CSV import row validation, and the
//! import log partition (imported + skipped = total rows).

use proptest::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{sort_contacts, Contact, ContactCategory, ContactKind};
use shared::validation::{validate_email, validate_phone};

const ALL_CATEGORIES: [ContactCategory; 5] = [
    ContactCategory::Dealer,
    ContactCategory::Vendor,
    ContactCategory::Engineer,
    ContactCategory::Inspector,
    ContactCategory::Other,
];

const ALL_KINDS: [ContactKind; 3] = [
    ContactKind::User,
    ContactKind::Factory,
    ContactKind::Directory,
];

// ============================================================================
// Helper Functions (mirroring the contact import)
// ============================================================================

/// One CSV row in a contact import file
#[derive(Debug, Deserialize)]
struct ImportRow {
    name: Option<String>,
    #[allow(dead_code)]
    company: Option<String>,
    #[allow(dead_code)]
    title: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    #[allow(dead_code)]
    category: Option<String>,
    #[allow(dead_code)]
    notes: Option<String>,
}

/// Mirror of the per-row validation
fn validate_import_row(row: &ImportRow) -> Result<(), String> {
    match row.name.as_deref() {
        None => return Err("missing name".to_string()),
        Some(name) if name.trim().is_empty() => return Err("missing name".to_string()),
        Some(_) => {}
    }
    if let Some(ref email) = row.email {
        if !email.is_empty() && validate_email(email).is_err() {
            return Err(format!("invalid email: {}", email));
        }
    }
    if let Some(ref phone) = row.phone {
        if !phone.is_empty() && validate_phone(phone).is_err() {
            return Err(format!("invalid phone: {}", phone));
        }
    }
    Ok(())
}

/// Mirror of the import scan: returns (imported, errors)
fn scan_import(data: &[u8]) -> (usize, Vec<String>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut imported = 0;
    let mut errors = Vec::new();
    for (index, result) in reader.deserialize::<ImportRow>().enumerate() {
        // Header occupies line 1
        let line = index + 2;
        match result {
            Ok(row) => match validate_import_row(&row) {
                Ok(()) => imported += 1,
                Err(reason) => errors.push(format!("row {}: {}", line, reason)),
            },
            Err(e) => errors.push(format!("row {}: {}", line, e)),
        }
    }
    (imported, errors)
}

const IMPORT_HEADER: &str = "name,company,title,email,phone,category,notes\n";

fn contact(name: &str) -> Contact {
    Contact {
        kind: ContactKind::Directory,
        id: Uuid::new_v4(),
        name: name.to_string(),
        title: None,
        email: None,
        phone: None,
        company: None,
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,20}"
}

fn category_strategy() -> impl Strategy<Value = ContactCategory> {
    prop::sample::select(&ALL_CATEGORIES[..])
}

fn kind_strategy() -> impl Strategy<Value = ContactKind> {
    prop::sample::select(&ALL_KINDS[..])
}

/// Field text including the characters CSV quoting must handle
fn csv_field_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            6 => proptest::char::range('a', 'z'),
            1 => Just(','),
            1 => Just('"'),
            1 => Just(' '),
        ],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Sorted contacts order case-insensitively and keep every entry
    #[test]
    fn prop_sort_contacts_orders_and_preserves(
        names in prop::collection::vec(name_strategy(), 0..25),
    ) {
        let mut contacts: Vec<Contact> = names.iter().map(|n| contact(n)).collect();
        sort_contacts(&mut contacts);

        prop_assert_eq!(contacts.len(), names.len());

        for pair in contacts.windows(2) {
            prop_assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
        }

        // Same multiset of names before and after
        let mut before: Vec<String> = names.clone();
        let mut after: Vec<String> = contacts.iter().map(|c| c.name.clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// Categories and kinds survive the storage round trip
    #[test]
    fn prop_category_round_trip(category in category_strategy()) {
        prop_assert_eq!(ContactCategory::from_str(category.as_str()), Some(category));
    }

    #[test]
    fn prop_kind_round_trip(kind in kind_strategy()) {
        prop_assert_eq!(ContactKind::from_str(kind.as_str()), Some(kind));
    }

    /// Imported + skipped always equals the number of data rows
    #[test]
    fn prop_import_scan_partitions(
        rows in prop::collection::vec((name_strategy(), any::<bool>()), 0..20),
    ) {
        let mut data = String::from(IMPORT_HEADER);
        for (name, valid) in &rows {
            if *valid {
                data.push_str(&format!("{},,,,,,\n", name));
            } else {
                // Missing name makes the row invalid
                data.push_str(",,,,,,\n");
            }
        }

        let (imported, errors) = scan_import(data.as_bytes());
        prop_assert_eq!(imported + errors.len(), rows.len());

        let expected_valid = rows.iter().filter(|(_, valid)| *valid).count();
        prop_assert_eq!(imported, expected_valid);
    }

    /// Fields with commas and quotes survive a CSV write/read cycle
    #[test]
    fn prop_csv_fields_survive_quoting(
        name in csv_field_strategy(),
        company in csv_field_strategy(),
    ) {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(["name", "company"]).unwrap();
        wtr.write_record([&name, &company]).unwrap();
        let bytes = wtr.into_inner().unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes.as_slice());
        let record = reader.records().next().unwrap().unwrap();

        prop_assert_eq!(record.get(0).unwrap(), name.as_str());
        prop_assert_eq!(record.get(1).unwrap(), company.as_str());
    }
}

// ============================================================================
// Unit Tests: Import Scanning
// ============================================================================

mod import_tests {
    use super::*;

    #[test]
    fn test_import_happy_path() {
        let data = format!(
            "{}Pat Lee,Acme Homes,Buyer,pat@acme.com,555-123-4567,vendor,\n\
             Dana Cruz,,,,,dealer,Preferred\n",
            IMPORT_HEADER
        );
        let (imported, errors) = scan_import(data.as_bytes());
        assert_eq!(imported, 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_import_reports_row_numbers() {
        // Row on line 3 has a bad email
        let data = format!(
            "{}Pat Lee,,,pat@acme.com,,,\n\
             Dana Cruz,,,not-an-email,,,\n",
            IMPORT_HEADER
        );
        let (imported, errors) = scan_import(data.as_bytes());
        assert_eq!(imported, 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("row 3:"));
        assert!(errors[0].contains("invalid email"));
    }

    #[test]
    fn test_import_skips_missing_name() {
        let data = format!("{},Acme Homes,,,,,\n", IMPORT_HEADER);
        let (imported, errors) = scan_import(data.as_bytes());
        assert_eq!(imported, 0);
        assert_eq!(errors, vec!["row 2: missing name".to_string()]);
    }

    #[test]
    fn test_import_trims_whitespace_fields() {
        // A whitespace-only name trims to empty and is skipped
        let data = format!("{}   ,,,,,,\n", IMPORT_HEADER);
        let (imported, errors) = scan_import(data.as_bytes());
        assert_eq!(imported, 0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_import_empty_email_allowed() {
        let data = format!("{}Pat Lee,,,,,,\n", IMPORT_HEADER);
        let (imported, errors) = scan_import(data.as_bytes());
        assert_eq!(imported, 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_import_bad_phone_skipped() {
        let data = format!("{}Pat Lee,,,,12345,,\n", IMPORT_HEADER);
        let (imported, errors) = scan_import(data.as_bytes());
        assert_eq!(imported, 0);
        assert!(errors[0].contains("invalid phone"));
    }

    #[test]
    fn test_import_header_only() {
        let (imported, errors) = scan_import(IMPORT_HEADER.as_bytes());
        assert_eq!(imported, 0);
        assert!(errors.is_empty());
    }
}

// ============================================================================
// Unit Tests: Merged Contact Ordering
// ============================================================================

mod ordering_tests {
    use super::*;

    #[test]
    fn test_sort_is_case_insensitive() {
        let mut contacts = vec![contact("walsh"), contact("Adams"), contact("BAKER")];
        sort_contacts(&mut contacts);

        let names: Vec<&str> = contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Adams", "BAKER", "walsh"]);
    }

    #[test]
    fn test_sort_ties_keep_insertion_order() {
        let first = contact("Pat");
        let second = contact("pat");
        let first_id = first.id;

        let mut contacts = vec![first, second];
        sort_contacts(&mut contacts);

        assert_eq!(contacts[0].id, first_id);
    }
}

// ============================================================================
// Unit Tests: Category and Kind Values
// ============================================================================

mod value_tests {
    use super::*;

    #[test]
    fn test_category_display_labels() {
        assert_eq!(ContactCategory::Dealer.to_string(), "Dealer");
        assert_eq!(ContactCategory::Vendor.to_string(), "Vendor");
        assert_eq!(ContactCategory::Other.to_string(), "Other");
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert_eq!(ContactCategory::from_str("supplier"), None);
        assert_eq!(ContactCategory::from_str("Dealer"), None);
    }

    #[test]
    fn test_kind_storage_values() {
        assert_eq!(ContactKind::User.as_str(), "user");
        assert_eq!(ContactKind::Factory.as_str(), "factory");
        assert_eq!(ContactKind::Directory.as_str(), "directory");
    }
}
