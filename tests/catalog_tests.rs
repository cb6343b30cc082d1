mod common;

use chartbook::{
    errors::{BookError, ValidationError},
    services::{AccountCatalog, CatalogWarning},
    storage::{BookStorage, JsonStore},
    validation::{has_at_most_two_decimals, is_alphabetic_name, validate_account_code},
};
use common::{open_store, temp_home};

#[test]
fn account_codes_follow_the_hierarchy_rules() {
    assert!(validate_account_code("1", None));
    assert!(validate_account_code("11", Some("1")));
    assert!(validate_account_code("1101", Some("11")));
    assert!(validate_account_code("110101", Some("1101")));
    assert!(validate_account_code("11010101", Some("110101")));

    assert!(!validate_account_code("21", Some("1")));
    assert!(!validate_account_code("11", Some("11")));
    assert!(!validate_account_code("113", Some("11")));
    assert!(!validate_account_code("123", None));
    assert!(!validate_account_code("1a", None));
    assert!(!validate_account_code("", None));
}

#[test]
fn any_code_extended_by_one_or_two_digits_along_the_table_stays_valid() {
    let mut code = String::from("4");
    let mut parent: Option<String> = None;
    for extension in ["1", "01", "03", "07"] {
        assert!(validate_account_code(&code, parent.as_deref()), "{code}");
        parent = Some(code.clone());
        code.push_str(extension);
    }
    assert!(validate_account_code(&code, parent.as_deref()));
}

#[test]
fn field_validators_match_their_contracts() {
    assert!(is_alphabetic_name("Petty Cash"));
    assert!(is_alphabetic_name("Depreciación"));
    assert!(!is_alphabetic_name("Cash 2"));

    for ok in ["0", "10", "10.5", "10.50"] {
        assert!(has_at_most_two_decimals(ok), "{ok}");
    }
    for bad in ["", "10.", ".5", "10.505", "-1", "1,000", "1e3"] {
        assert!(!has_at_most_two_decimals(bad), "{bad}");
    }
}

#[test]
fn new_store_holds_the_six_class_accounts() {
    let store = open_store();
    let codes: Vec<_> = store
        .list_accounts()
        .unwrap()
        .into_iter()
        .map(|account| account.code)
        .collect();
    assert_eq!(codes, ["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn reopening_the_store_does_not_duplicate_seed_rows() {
    let home = temp_home();
    JsonStore::open(&home).unwrap();
    let store = JsonStore::open(&home).unwrap();
    assert_eq!(AccountCatalog::new(&store).count().unwrap(), 6);
}

#[test]
fn created_accounts_round_trip_and_survive_reopening() {
    let home = temp_home();
    {
        let store = JsonStore::open(&home).unwrap();
        let catalog = AccountCatalog::new(&store);
        catalog.create("11", "CURRENT ASSETS", "1").unwrap();
        catalog.create("1101", "Cash", "11").unwrap();
    }
    let store = JsonStore::open(&home).unwrap();
    let found = AccountCatalog::new(&store).find("1101").unwrap().unwrap();
    assert_eq!(found.name, "Cash");
    assert_eq!(found.parent_code.as_deref(), Some("11"));
}

#[test]
fn catalog_rejects_bad_input_without_writing() {
    let store = open_store();
    let catalog = AccountCatalog::new(&store);

    assert!(matches!(
        catalog.create("123", "OTHER", "").unwrap_err(),
        BookError::Validation(ValidationError::InvalidCode { .. })
    ));
    assert!(matches!(
        catalog.create("1", "ASSETS", "").unwrap_err(),
        BookError::Validation(ValidationError::DuplicateCode(_))
    ));
    assert!(matches!(
        catalog.create("1101", "Cash", "11").unwrap_err(),
        BookError::Validation(ValidationError::UnknownParent(_))
    ));
    assert!(matches!(
        catalog.create("11", "Cash 1", "1").unwrap_err(),
        BookError::Validation(ValidationError::NonAlphabeticName(_))
    ));
    assert_eq!(catalog.count().unwrap(), 6);
}

#[test]
fn deleting_a_missing_code_changes_nothing() {
    let store = open_store();
    let catalog = AccountCatalog::new(&store);
    assert!(!catalog.delete("99").unwrap());
    assert_eq!(catalog.count().unwrap(), 6);
}

#[test]
fn deleting_a_parent_leaves_children_flagged_as_orphans() {
    let store = open_store();
    let catalog = AccountCatalog::new(&store);
    catalog.create("11", "CURRENT ASSETS", "1").unwrap();
    catalog.create("1101", "Cash", "11").unwrap();

    assert!(catalog.delete("11").unwrap());
    assert!(catalog.find("1101").unwrap().is_some());
    assert_eq!(
        catalog.warnings().unwrap(),
        vec![CatalogWarning::OrphanedAccount {
            code: "1101".into(),
            parent_code: "11".into(),
        }]
    );
}
