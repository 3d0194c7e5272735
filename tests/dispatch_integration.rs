//! Integration tests for load -> classify -> dispatch
//!
//! These tests drive the public API the way the prompt does: load a CSV,
//! run a command, answer any parameter requests, and run it again.

use tabletalk::chart::Chart;
use tabletalk::command::{
    CommandDispatcher, DiagnosticKind, Outcome, ParamKey, ParamRequest, SuppliedParams,
};
use tabletalk::core::config::AssistantConfig;
use tabletalk::intent::Intent;
use tabletalk::session::Session;
use tabletalk::table::{load_bytes, Table, Value};

const PEOPLE_CSV: &str = "\
id,name,age,city,income
1,Ann,28,Paris,52000
2,Bob,35,paris,61000
3,Cid,42,Lyon,
4,Dee,30,Paris ,48000.5
5,Eve,51,Paris,75000
6,Fay,23,Nice,39000
7,Gus,35,Lyon,58000
8,Hal,64,Paris,81000
9,Ida,19,Nice,
10,Jon,47,Lyon,67000
11,Kim,33,Paris,55000
12,Lou,38,Nice,60000
";

fn people() -> Table {
    load_bytes(PEOPLE_CSV.as_bytes(), "people.csv", &AssistantConfig::default()).unwrap()
}

fn dispatch(intent: Intent, table: &Table, params: &SuppliedParams) -> Outcome {
    CommandDispatcher::new(&AssistantConfig::default()).dispatch(intent, table, params)
}

fn rows(outcome: Outcome) -> Table {
    match outcome {
        Outcome::Rows(table) => table,
        other => panic!("expected rows, got {:?}", other),
    }
}

fn ids(table: &Table) -> Vec<String> {
    table.column("id").unwrap().values.iter().map(Value::text_form).collect()
}

// ============================================================================
// Head / tail
// ============================================================================

#[test]
fn test_show_top_returns_first_ten_in_order() {
    let table = people();
    let top = rows(dispatch(Intent::ShowTop, &table, &SuppliedParams::new()));
    assert_eq!(top.row_count(), 10);
    assert_eq!(ids(&top), (1..=10).map(|i| i.to_string()).collect::<Vec<_>>());
}

#[test]
fn test_show_top_on_short_table() {
    let table = people().head(3);
    let top = rows(dispatch(Intent::ShowTop, &table, &SuppliedParams::new()));
    assert_eq!(ids(&top), vec!["1", "2", "3"]);
}

#[test]
fn test_show_bottom_returns_last_ten() {
    let bottom = rows(dispatch(Intent::ShowBottom, &people(), &SuppliedParams::new()));
    assert_eq!(bottom.row_count(), 10);
    assert_eq!(ids(&bottom).first().unwrap(), "3");
    assert_eq!(ids(&bottom).last().unwrap(), "12");
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_filter_condition_age_over_30() {
    let params = SuppliedParams::new()
        .with(ParamKey::Column, "age")
        .with(ParamKey::Operator, ">")
        .with(ParamKey::Value, "30");
    let table = rows(dispatch(Intent::FilterCondition, &people(), &params));
    assert_eq!(ids(&table), vec!["2", "3", "5", "7", "8", "10", "11", "12"]);
}

#[test]
fn test_filter_condition_all_operators() {
    let table = people();
    let count = |op: &str| {
        let params = SuppliedParams::new()
            .with(ParamKey::Column, "age")
            .with(ParamKey::Operator, op)
            .with(ParamKey::Value, " 35 ");
        rows(dispatch(Intent::FilterCondition, &table, &params)).row_count()
    };
    assert_eq!(count(">"), 5);
    assert_eq!(count(">="), 7);
    assert_eq!(count("<"), 5);
    assert_eq!(count("<="), 7);
}

#[test]
fn test_filter_condition_missing_never_matches() {
    let params = SuppliedParams::new()
        .with(ParamKey::Column, "income")
        .with(ParamKey::Operator, ">=")
        .with(ParamKey::Value, "0");
    let table = rows(dispatch(Intent::FilterCondition, &people(), &params));
    assert_eq!(table.row_count(), 10);
}

#[test]
fn test_filter_condition_non_numeric_value_is_diagnostic() {
    let params = SuppliedParams::new()
        .with(ParamKey::Column, "age")
        .with(ParamKey::Operator, ">")
        .with(ParamKey::Value, "abc");
    match dispatch(Intent::FilterCondition, &people(), &params) {
        Outcome::Diagnostic(d) => assert_eq!(d.kind, DiagnosticKind::InvalidNumericValue),
        other => panic!("expected diagnostic, got {:?}", other),
    }
}

#[test]
fn test_filter_value_is_exact_and_case_sensitive() {
    let table = people();
    let filter = |literal: &str| {
        let params = SuppliedParams::new()
            .with(ParamKey::Column, "city")
            .with(ParamKey::Value, literal);
        rows(dispatch(Intent::FilterValue, &table, &params))
    };
    assert_eq!(ids(&filter("Paris")), vec!["1", "5", "8", "11"]);
    assert_eq!(ids(&filter("paris")), vec!["2"]);
    assert_eq!(ids(&filter("Paris ")), vec!["4"]);
    assert_eq!(filter("Par").row_count(), 0);
}

#[test]
fn test_filter_value_compares_textual_form() {
    // income has gaps, so it is a float column and prints with a decimal
    let params = SuppliedParams::new()
        .with(ParamKey::Column, "income")
        .with(ParamKey::Value, "52000.0");
    assert_eq!(ids(&rows(dispatch(Intent::FilterValue, &people(), &params))), vec!["1"]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_descending_reverses_ascending_on_unique_key() {
    let table = people();
    let sort = |ascending: &str| {
        let params = SuppliedParams::new()
            .with(ParamKey::Column, "name")
            .with(ParamKey::Ascending, ascending);
        ids(&rows(dispatch(Intent::SortData, &table, &params)))
    };
    let mut asc = sort("yes");
    let desc = sort("no");
    asc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn test_sort_keeps_tie_order_both_directions() {
    let table = people();
    let sort = |ascending: bool| {
        let params = SuppliedParams::new()
            .with(ParamKey::Column, "age")
            .with(ParamKey::Ascending, ascending.to_string());
        ids(&rows(dispatch(Intent::SortData, &table, &params)))
    };
    let asc = sort(true);
    let desc = sort(false);
    // Bob (2) and Gus (7) are both 35
    let pos = |v: &[String], id: &str| v.iter().position(|x| x == id).unwrap();
    assert!(pos(&asc, "2") < pos(&asc, "7"));
    assert!(pos(&desc, "2") < pos(&desc, "7"));
    assert_eq!(asc.first().unwrap(), "9");
    assert_eq!(desc.first().unwrap(), "8");
}

// ============================================================================
// Summaries and charts
// ============================================================================

#[test]
fn test_show_columns_declared_order() {
    let outcome = dispatch(Intent::ShowColumns, &people(), &SuppliedParams::new());
    assert_eq!(
        outcome,
        Outcome::Columns(vec![
            "id".into(),
            "name".into(),
            "age".into(),
            "city".into(),
            "income".into()
        ])
    );
}

#[test]
fn test_show_missing_counts() {
    let Outcome::Missing(counts) = dispatch(Intent::ShowMissing, &people(), &SuppliedParams::new()) else {
        panic!("expected missing counts");
    };
    let income = counts.iter().find(|m| m.column == "income").unwrap();
    assert_eq!(income.missing, 2);
    assert!(counts.iter().filter(|m| m.column != "income").all(|m| m.missing == 0));
}

#[test]
fn test_plot_line_requests_both_axes() {
    let Outcome::NeedsInput(requests) = dispatch(Intent::PlotLine, &people(), &SuppliedParams::new()) else {
        panic!("expected NeedsInput");
    };
    let keys: Vec<ParamKey> = requests.iter().map(|r: &ParamRequest| r.key).collect();
    assert_eq!(keys, vec![ParamKey::X, ParamKey::Y]);
    assert_eq!(requests[0].choices().unwrap().len(), 5);
}

#[test]
fn test_plot_line_chart() {
    let params = SuppliedParams::new()
        .with(ParamKey::X, "age")
        .with(ParamKey::Y, "income");
    let Outcome::Chart(Chart::Line(line)) = dispatch(Intent::PlotLine, &people(), &params) else {
        panic!("expected line chart");
    };
    assert!(line.points.windows(2).all(|w| w[0].0 < w[1].0));
    // two 35-year-olds average their incomes
    let at_35 = line.points.iter().find(|p| p.0 == 35.0).unwrap();
    assert_eq!(at_35.1, (61000.0 + 58000.0) / 2.0);
}

#[test]
fn test_correlation_heatmap_over_numeric_columns() {
    let Outcome::Chart(Chart::Heatmap(heatmap)) =
        dispatch(Intent::CorrelationHeatmap, &people(), &SuppliedParams::new())
    else {
        panic!("expected heatmap");
    };
    assert_eq!(heatmap.matrix.labels, vec!["id", "age", "income"]);
    assert_eq!(heatmap.annotation(1, 1), "1.00");
    let r = heatmap.matrix.get("age", "income").unwrap();
    assert!(r > 0.5, "age and income should correlate, got {}", r);
}

// ============================================================================
// Session re-run cycle
// ============================================================================

#[test]
fn test_session_rerun_after_answers() {
    let mut session = Session::new(people(), &AssistantConfig::default());
    let mut params = SuppliedParams::new();

    let first = session.run("Please FILTER BY CONDITION", &params);
    assert_eq!(first.intent, Intent::FilterCondition);
    let Outcome::NeedsInput(pending) = first.outcome else {
        panic!("expected NeedsInput");
    };
    assert_eq!(pending.len(), 3);

    params.set(ParamKey::Column, "age");
    params.set(ParamKey::Operator, "<=");
    params.set(ParamKey::Value, "23");
    let second = session.run("Please FILTER BY CONDITION", &params);
    assert_eq!(ids(&rows(second.outcome)), vec!["6", "9"]);
    assert_eq!(session.log().len(), 1);
}

#[test]
fn test_session_never_mutates_table() {
    let mut session = Session::new(people(), &AssistantConfig::default());
    let before = session.table().clone();
    let params = SuppliedParams::new()
        .with(ParamKey::Column, "age")
        .with(ParamKey::Ascending, "false");
    session.run("sort the data", &params);
    session.run("show last rows", &params);
    assert_eq!(session.table(), &before);
}

#[test]
fn test_interaction_serializes_to_json() {
    let mut session = Session::new(people(), &AssistantConfig::default());
    let interaction = session.run("what are the columns?", &SuppliedParams::new());
    let json = serde_json::to_value(&interaction).unwrap();
    assert_eq!(json["intent"], "show_columns");
    assert_eq!(json["outcome"]["type"], "columns");
    assert_eq!(json["outcome"]["data"][0], "id");
}
