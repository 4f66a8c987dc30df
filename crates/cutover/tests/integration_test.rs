//! Integration tests for Cutover.

use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

use cutover::{
    CountryAllowSet, Cutover, CutoverError, Family, FamilyConfig, FamilyInputs, MISSING, Table,
    Value, write_outcome,
};

const CODE: &str = "Attribute Value Code";

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn load(cutover: &Cutover, name: &str, content: &str) -> Table {
    let file = create_test_file(content);
    cutover.load_table(name, file.path()).expect("Load failed").0
}

fn allow(list: &str) -> CountryAllowSet {
    CountryAllowSet::parse(list).expect("Invalid allow-set")
}

// =============================================================================
// End-to-end Scenarios
// =============================================================================

#[test]
fn test_validated_row_survives_exact_key_match() {
    let cutover = Cutover::new();
    let rf = load(
        &cutover,
        "I53 RF",
        "Country,Attribute Value Code,Price\nUS,X1,10\n",
    );
    let hos35 = load(&cutover, "I35 HOS", "Country,Attribute Value Code\nUS,X1\n");

    let outcome = cutover
        .reconcile(&FamilyInputs::I53 { rf: rf.clone(), hos35 }, &allow("US"))
        .expect("Reconcile failed");
    assert_eq!(outcome.table.row_count(), 1);
    assert_eq!(outcome.table.get(0, "Price"), Some(&Value::from(10.0)));

    let hos35 = load(&cutover, "I35 HOS", "Country,Attribute Value Code\nUS,X2\n");
    let outcome = cutover
        .reconcile(&FamilyInputs::I53 { rf, hos35 }, &allow("US"))
        .expect("Reconcile failed");
    assert!(outcome.is_empty());
}

#[test]
fn test_online_record_converted_into_lookup_record() {
    let cutover = Cutover::new();
    let rf52 = load(
        &cutover,
        "I52 RF",
        "Country,Attribute Value Code,Attribute Value Description,Display Group Code,\
         Attribute Value Price Type,Attribute Value FP,Currency,Sort Order\n\
         US,N1,Native,STD,Fixed,1,USD,7\n",
    );
    let rf51 = load(
        &cutover,
        "I51 RF",
        "Country,Attribute Value Code,Attribute Value Description,Attribute Value FP,Currency,Display Group Code\n\
         US,HEL_15T_IN,Helpdesk 15,12.5,USD,ONL\n\
         US,P1,Plain,3,USD,STD\n",
    );
    let hos36 = load(
        &cutover,
        "I36 HOS",
        "Country,Attribute Value Code\nUS,N1\nUS,HEL_15T_IN\nUS,P1\n",
    );

    let outcome = cutover
        .reconcile(&FamilyInputs::I52 { rf52, rf51, hos36 }, &allow("US"))
        .expect("Reconcile failed");

    assert_eq!(outcome.table.row_count(), 2);
    let converted = outcome.table.row(1).expect("Converted row missing");
    assert_eq!(converted.get(CODE), Some(&Value::from("HEL_15T_IN")));
    assert_eq!(converted.get("Display Group Code"), Some(&Value::from("LI")));
    assert_eq!(
        converted.get("Attribute Value Price Type"),
        Some(&Value::from("Lookup"))
    );
    assert_eq!(
        converted.get("Attribute Value Description"),
        Some(&Value::from("Helpdesk 15"))
    );
    assert_eq!(converted.get("Attribute Value FP"), Some(&Value::from(12.5)));
    assert_eq!(converted.get("Currency"), Some(&Value::from("USD")));
    assert_eq!(converted.get("Sort Order"), Some(&MISSING));
}

#[test]
fn test_master_data_difference_reported_once() {
    let cutover = Cutover::new();
    let hos = load(&cutover, "I01 HOS", "Country,h_cost_rate,mat_hand\nUS,5,1.5\n");
    let rf = load(&cutover, "I01 RF", "Country,h_cost_rate,mat_hand\nUS,7,1.5\n");

    let outcome = cutover
        .reconcile(&FamilyInputs::I01 { rf, hos }, &allow("US"))
        .expect("Reconcile failed");

    let diffs = outcome.differences.as_ref().expect("No differences");
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].country, "US");
    assert_eq!(diffs[0].column, "h_cost_rate");
    assert_eq!(diffs[0].old_value, Value::from(5.0));
    assert_eq!(diffs[0].new_value, Value::from(7.0));

    let report = outcome
        .differences_table()
        .expect("Report failed")
        .expect("No report");
    assert_eq!(
        report.column_names(),
        vec!["Country", "Column", "Old Value", "New Value"]
    );
    assert_eq!(report.name(), "I01_changes");
}

#[test]
fn test_master_data_equal_numbers_in_other_format_are_not_differences() {
    let cutover = Cutover::new();
    let hos = load(&cutover, "I01 HOS", "Country,h_cost_rate,mat_hand\nUS,12.5,5\n");
    let rf = load(&cutover, "I01 RF", "Country,h_cost_rate,mat_hand\nUS,12.50,5.0\n");

    let outcome = cutover
        .reconcile(&FamilyInputs::I01 { rf, hos }, &allow("US"))
        .expect("Reconcile failed");

    assert_eq!(outcome.summary.differences, 0);
    assert!(outcome.differences.as_ref().expect("No report").is_empty());
    let written = outcome.table.get(0, "h_cost_rate").expect("Cell missing");
    assert_eq!(written.to_string(), "12.50");
}

// =============================================================================
// Family Tests
// =============================================================================

#[test]
fn test_family_34_splits_by_country() {
    let cutover = Cutover::new();
    let rf = load(
        &cutover,
        "I34 RF",
        "Country,Name,a,b,c,d\nGB,x,1,2,3,4\nUS,y,1,2,3,4\nDE,z,1,2,3,4\nGB,w,1,2,3,4\n",
    );

    let outcome = cutover
        .reconcile(&FamilyInputs::I34 { rf }, &allow("GB,DE"))
        .expect("Reconcile failed");
    assert_eq!(outcome.table.row_count(), 3);

    let parts = outcome.export_partitions(4).expect("Export failed");
    let countries: Vec<&str> = parts.keys().map(|k| k.as_str()).collect();
    assert_eq!(countries, vec!["GB", "DE"]);
    assert_eq!(parts["GB"].name(), "I34_GB");
    assert_eq!(parts["GB"].row_count(), 2);
    assert_eq!(parts["GB"].column_names(), vec!["Country", "Name"]);
}

#[test]
fn test_family_38_validates_against_both_extracts() {
    let cutover = Cutover::new();
    let rf = load(
        &cutover,
        "I38 RF",
        "Country,Attribute Value Code,Price\nUS,A,1\nUS,B,2\nUS,B,3\nUS,C,4\n",
    );
    let hos38 = load(&cutover, "I38 HOS", "Country,Attribute Value Code\nUS,A\nUS,B\n");
    let hos37 = load(&cutover, "I37 HOS", "Country,Attribute Value Code\nUS,B\nUS,C\n");

    let outcome = cutover
        .reconcile(&FamilyInputs::I38 { rf, hos38, hos37 }, &allow("US"))
        .expect("Reconcile failed");

    assert_eq!(outcome.table.row_count(), 1);
    assert_eq!(outcome.table.get(0, "Price"), Some(&Value::from(2.0)));
    assert_eq!(outcome.summary.inputs[0].duplicates_dropped, 1);
    assert_eq!(outcome.summary.rejected_rows, 2);
}

#[test]
fn test_family_51_drops_online_codes_before_validation() {
    let cutover = Cutover::new();
    let rf = load(
        &cutover,
        "I51 RF",
        "Country,Attribute Value Code\nUS,UQCM_IN\nUS,EASYSWITCH_IN\nUS,P1\nGB,P1\n",
    );
    let hos37 = load(
        &cutover,
        "I37 HOS",
        "Country,Attribute Value Code\nUS,UQCM_IN\nUS,P1\nGB,P1\n",
    );

    let outcome = cutover
        .reconcile(&FamilyInputs::I51 { rf, hos37 }, &allow("US"))
        .expect("Reconcile failed");

    assert_eq!(outcome.summary.excluded_rows, 2);
    assert_eq!(outcome.table.row_count(), 1);
    assert_eq!(outcome.table.get(0, CODE), Some(&Value::from("P1")));
}

#[test]
fn test_numeric_codes_match_their_text_form() {
    let cutover = Cutover::new();
    let rf = load(&cutover, "I53 RF", "Country,Attribute Value Code\nUS,100\nUS,007\n");
    let hos35 = load(&cutover, "I35 HOS", "Country,Attribute Value Code\nUS,100\nUS,7\n");

    let outcome = cutover
        .reconcile(&FamilyInputs::I53 { rf, hos35 }, &allow("US"))
        .expect("Reconcile failed");

    assert_eq!(outcome.table.row_count(), 1);
    assert_eq!(outcome.table.get(0, CODE), Some(&Value::from(100.0)));
}

// =============================================================================
// Precondition Tests
// =============================================================================

#[test]
fn test_empty_allow_set_rejected() {
    let err = CountryAllowSet::parse(" , ").unwrap_err();
    assert!(matches!(err, CutoverError::EmptyAllowSet));
    assert!(err.is_precondition());
}

#[test]
fn test_missing_column_names_the_input() {
    let cutover = Cutover::new();
    let rf = load(&cutover, "I38 RF", "Country,Attribute Value Code\nUS,A\n");
    let hos38 = load(&cutover, "I38 HOS", "Country,Attribute Value Code\nUS,A\n");
    let hos37 = load(&cutover, "I37 HOS", "Country,Code\nUS,A\n");

    let err = cutover
        .reconcile(&FamilyInputs::I38 { rf, hos38, hos37 }, &allow("US"))
        .unwrap_err();
    assert!(err.is_precondition());
    let message = err.to_string();
    assert!(message.contains("I37 HOS"));
    assert!(message.contains(CODE));
}

#[test]
fn test_header_only_inputs_give_empty_result() {
    let cutover = Cutover::new();
    let rf = load(&cutover, "I53 RF", "Country,Attribute Value Code\n");
    let hos35 = load(&cutover, "I35 HOS", "Country,Attribute Value Code\n");

    let outcome = cutover
        .reconcile(&FamilyInputs::I53 { rf, hos35 }, &allow("US"))
        .expect("Reconcile failed");
    assert!(outcome.is_empty());
    assert!(outcome.export_partitions(4).expect("Export failed").is_empty());
}

// =============================================================================
// Loading and Export Tests
// =============================================================================

#[test]
fn test_bom_and_padded_headers_are_normalised() {
    let cutover = Cutover::new();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b" Country ;Attribute Value Code \nUS;X1\n");
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(&bytes).expect("Failed to write");

    let (table, meta) = cutover.load_table("I37 HOS", file.path()).expect("Load failed");
    assert_eq!(table.column_names(), vec!["Country", CODE]);
    assert!(meta.had_bom);
    assert_eq!(meta.format, "csv-semicolon");
}

#[test]
fn test_write_outcome_per_country() {
    let cutover = Cutover::new();
    let rf = load(
        &cutover,
        "I53 RF",
        "Country,Attribute Value Code,Price,h1,h2,h3,h4\nUS,X1,10,a,b,c,d\nGB,X1,11,a,b,c,d\n",
    );
    let hos35 = load(&cutover, "I35 HOS", "Country,Attribute Value Code\nUS,X1\nGB,X1\n");
    let outcome = cutover
        .reconcile(&FamilyInputs::I53 { rf, hos35 }, &allow("US,GB"))
        .expect("Reconcile failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let written = write_outcome(&outcome, dir.path(), 4).expect("Write failed");
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("I53_US.csv"));

    let us = fs::read_to_string(&written[0]).expect("Read failed");
    assert_eq!(us, "Country,Attribute Value Code,Price\nUS,X1,10\n");
}

#[test]
fn test_config_file_overrides_constants() {
    let config_file = create_test_file("online_codes = [\"P1\"]\n");
    let families = FamilyConfig::load(config_file.path()).expect("Config failed");
    let cutover = Cutover::new().with_families(families);

    let rf = load(&cutover, "I51 RF", "Country,Attribute Value Code\nUS,P1\nUS,UQCM_IN\n");
    let hos37 = load(&cutover, "I37 HOS", "Country,Attribute Value Code\nUS,P1\nUS,UQCM_IN\n");
    let outcome = cutover
        .reconcile(&FamilyInputs::I51 { rf, hos37 }, &allow("US"))
        .expect("Reconcile failed");

    assert_eq!(outcome.family, Family::I51);
    assert_eq!(outcome.table.row_count(), 1);
    assert_eq!(outcome.table.get(0, CODE), Some(&Value::from("UQCM_IN")));
}
