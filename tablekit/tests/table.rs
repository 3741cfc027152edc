use std::sync::{Arc, Mutex};
use std::time::Duration;

use tablekit::breakpoint::{Breakpoint, Breakpoints, Viewport};
use tablekit::engine::{Pagination, Selection, SelectionMode};
use tablekit::model::{DataItem, Record, RowId, Value};
use tablekit::query::{Direction, FilterDef, FilterOption};
use tablekit::table::{
    Action, EmptyState, Layout, MobileConfig, PaginationConfig, RenderState, SelectionConfig,
    Table, TableBuilder, TableConfig, render_text,
};

fn bob_ann() -> Vec<Record> {
    vec![
        Record::new(1).with("name", "Bob").with("age", 30),
        Record::new(2).with("name", "Ann").with("age", 25),
    ]
}

fn names(table: &Table<Record>) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|r| r.field("name").to_string())
        .collect()
}

fn people(n: i64) -> Vec<Record> {
    (1..=n)
        .map(|i| {
            Record::new(i)
                .with("name", format!("Person {i}"))
                .with("age", 20 + (i % 7))
                .with("active", i % 2 == 0)
        })
        .collect()
}

fn people_config() -> TableConfig<Record> {
    TableBuilder::new()
        .add_column_with("name", "Name", |c| c.sortable())
        .add_column_with("age", "Age", |c| c.sortable())
        .add_column("active", "Active")
        .enable_sorting()
        .add_filters([
            FilterDef::text("name", "Name"),
            FilterDef::number("age", "Age"),
            FilterDef::boolean("active", "Active"),
        ])
        .enable_pagination(PaginationConfig::default().with_page_size(5))
        .build()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_sort_cycle_restores_insertion_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let config = TableBuilder::new()
        .add_column_with("name", "Name", |c| c.sortable())
        .enable_sorting()
        .on_sort(move |key, direction| sink.lock().unwrap().push((key.to_string(), direction)))
        .build();
    let mut table = Table::new(bob_ann(), config);

    assert!(table.sort_by("name"));
    assert_eq!(names(&table), ["Ann", "Bob"]);
    assert!(table.sort_by("name"));
    assert_eq!(names(&table), ["Bob", "Ann"]);
    assert!(table.sort_by("name"));
    assert_eq!(names(&table), ["Bob", "Ann"]);
    assert_eq!(table.sort_direction("name"), None);

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            ("name".to_string(), Some(Direction::Asc)),
            ("name".to_string(), Some(Direction::Desc)),
            ("name".to_string(), None),
        ]
    );
}

#[test]
fn test_sort_requires_enabled_and_sortable_column() {
    let config = TableBuilder::new()
        .add_column_with("name", "Name", |c| c.sortable())
        .add_column("age", "Age")
        .build();
    let mut table = Table::new(bob_ann(), config);
    assert!(!table.sort_by("name"));

    let config = TableBuilder::new()
        .add_column_with("name", "Name", |c| c.sortable())
        .add_column("age", "Age")
        .enable_sorting()
        .build();
    let mut table = Table::new(bob_ann(), config);
    assert!(!table.sort_by("age"));
    assert!(table.sort().current().is_none());
}

#[test]
fn test_text_filter_is_case_insensitive_substring() {
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_filter(FilterDef::text("name", "Name"))
        .build();
    let mut table = Table::new(bob_ann(), config);
    table.set_filter("name", "an");

    let ids: Vec<RowId> = table.rows().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![RowId::from(2)]);
    assert_eq!(table.active_filter_count(), 1);
}

#[test]
fn test_two_page_navigation() {
    let mut pages = Pagination::new(1, 1);
    pages.set_total(2);
    assert!(pages.has_next());
    assert!(!pages.has_previous());

    assert!(pages.next_page());
    assert_eq!(pages.page(), 2);
    assert!(!pages.has_next());
    assert!(pages.has_previous());

    assert!(!pages.next_page());
    assert_eq!(pages.page(), 2);
}

#[test]
fn test_single_selection_keeps_latest() {
    let mut selection = Selection::single();
    selection.set_rows(
        [RowId::from(1), RowId::from(2)],
        [RowId::from(1), RowId::from(2)],
    );
    selection.select(1.into());
    selection.select(2.into());
    assert_eq!(selection.selected(), vec![RowId::from(2)]);
}

#[test]
fn test_viewport_widths_classify() {
    let viewport = Viewport::new(500);
    let config = TableBuilder::new().add_column("name", "Name").build();
    let table = Table::with_viewport(bob_ann(), config, &viewport);
    assert_eq!(table.breakpoint(), Breakpoint::Mobile);
    viewport.resize(900);
    assert_eq!(table.breakpoint(), Breakpoint::Tablet);
    viewport.resize(1300);
    assert_eq!(table.breakpoint(), Breakpoint::Desktop);
    assert_eq!(Breakpoints::default(), Breakpoints::new(768, 1024));
}

// =============================================================================
// Orchestration
// =============================================================================

#[test]
fn test_filter_change_returns_to_first_page() {
    let mut table = Table::new(people(20), people_config());
    assert!(table.go_to_page(3));
    table.set_filter("active", true);
    assert_eq!(table.pagination().page(), 1);
    assert_eq!(table.total_items(), 10);
    assert_eq!(table.pagination().total_pages(), 2);
}

#[test]
fn test_page_change_callback_only_when_moved() {
    let pages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&pages);
    let mut config = people_config();
    config.on_page_change = Some(Arc::new(move |p| sink.lock().unwrap().push(p)));
    let mut table = Table::new(people(12), config);

    assert!(table.next_page());
    assert!(table.last_page());
    assert!(!table.next_page());
    assert!(!table.go_to_page(9));
    assert!(table.first_page());
    assert!(!table.previous_page());
    assert_eq!(*pages.lock().unwrap(), vec![2, 3, 1]);
}

#[test]
fn test_set_page_size_clamps_current_page() {
    let sizes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&sizes);
    let mut config = people_config();
    config.on_page_size_change = Some(Arc::new(move |s| sink.lock().unwrap().push(s)));
    let mut table = Table::new(people(12), config);

    table.last_page();
    assert_eq!(table.pagination().page(), 3);
    assert!(table.set_page_size(10));
    assert_eq!(table.pagination().page(), 2);
    assert_eq!(table.rows().len(), 2);
    assert!(!table.set_page_size(0));
    assert_eq!(*sizes.lock().unwrap(), vec![10]);
}

#[test]
fn test_data_refresh_keeps_state_and_clamps_page() {
    let mut table = Table::new(people(20), people_config());
    table.sort_by("age");
    table.go_to_page(4);
    table.set_data(people(7));
    assert_eq!(table.pagination().page(), 2);
    assert_eq!(table.sort_direction("age"), Some(Direction::Asc));
}

#[test]
fn test_invalid_number_filter_is_reported_and_skipped() {
    let mut table = Table::new(people(6), people_config());
    table.set_filter("age", "abc");
    assert_eq!(table.total_items(), 6);
    assert_eq!(
        table.validation_errors().get("age").map(String::as_str),
        Some("Must be a valid number")
    );

    table.set_filter("age", "21");
    assert!(table.validation_errors().is_empty());
    let ages: Vec<Value> = table.rows().iter().map(|r| r.field("age")).collect();
    assert!(ages.iter().all(|a| *a == Value::from(21)));
}

#[test]
fn test_filterable_column_enables_text_filter() {
    let config = TableBuilder::new()
        .add_column_with("name", "Name", |c| c.filterable())
        .add_column("age", "Age")
        .build();
    let mut table = Table::new(bob_ann(), config);

    table.set_filter("name", "an");
    assert_eq!(names(&table), ["Ann"]);
    let bar = table.view().filter_bar.expect("filter bar");
    let keys: Vec<&str> = bar.fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, ["name"]);
}

#[test]
fn test_select_filter_requires_exact_option() {
    let config = TableBuilder::new()
        .add_column("status", "Status")
        .add_filter(FilterDef::select(
            "status",
            "Status",
            [
                FilterOption::new("Active", "active"),
                FilterOption::new("Inactive", "inactive"),
            ],
        ))
        .build();
    let rows = vec![
        Record::new(1).with("status", "active"),
        Record::new(2).with("status", "inactive"),
    ];
    let mut table = Table::new(rows, config);

    table.set_filter("status", "active");
    let ids: Vec<RowId> = table.rows().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![RowId::from(1)]);

    table.set_filter("status", "inactive");
    let ids: Vec<RowId> = table.rows().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![RowId::from(2)]);

    table.set_filter("status", "act");
    assert_eq!(table.total_items(), 0);
}

#[test]
fn test_zero_and_false_filters_are_active() {
    let data = vec![
        Record::new(1).with("count", 0).with("flag", false),
        Record::new(2).with("count", 3).with("flag", true),
    ];
    let config = TableBuilder::new()
        .add_column("count", "Count")
        .add_column("flag", "Flag")
        .add_filters([FilterDef::number("count", "Count"), FilterDef::boolean("flag", "Flag")])
        .build();
    let mut table = Table::new(data, config);
    table.set_filter("count", 0);
    assert_eq!(table.total_items(), 1);
    table.clear_filter("count");
    table.set_filter("flag", false);
    assert_eq!(table.rows()[0].id(), RowId::from(1));
}

#[test]
fn test_reset_filters_restores_defaults() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_column("active", "Active")
        .add_filters([
            FilterDef::text("name", "Name"),
            FilterDef::boolean("active", "Active").with_default(true),
        ])
        .on_filter_change(move |k, v| sink.lock().unwrap().push((k.to_string(), v.clone())))
        .build();
    let mut table = Table::new(people(4), config);
    assert_eq!(table.total_items(), 2);

    table.clear_all_filters();
    table.set_filter("name", "Person 1");
    table.reset_filters();
    assert_eq!(table.filters().value("active"), Value::Bool(true));
    assert_eq!(table.filters().value("name"), Value::Null);

    let log = changes.lock().unwrap();
    assert_eq!(log[0], ("active".to_string(), Value::Null));
    assert_eq!(log[1], ("name".to_string(), Value::from("Person 1")));
    assert!(log[2..].contains(&("active".to_string(), Value::Bool(true))));
    assert!(log[2..].contains(&("name".to_string(), Value::Null)));
}

#[test]
fn test_filtering_ignored_unless_enabled() {
    let config = TableBuilder::new().add_column("name", "Name").build();
    let mut table = Table::new(bob_ann(), config);
    table.set_filter("name", "zzz");
    assert_eq!(table.total_items(), 2);
}

#[test]
fn test_single_selection_callback_reports_new_state() {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .enable_selection(SelectionMode::Single)
        .on_selection_change(move |ids| {
            let mut ids: Vec<RowId> = ids.iter().cloned().collect();
            ids.sort();
            sink.lock().unwrap().push(ids);
        })
        .build();
    let mut table = Table::new(bob_ann(), config);

    assert!(table.toggle_row_selection(1));
    assert!(table.toggle_row_selection(2));
    assert!(table.toggle_row_selection(2));
    assert!(!table.toggle_all_selection());
    assert_eq!(
        *reports.lock().unwrap(),
        vec![vec![RowId::from(1)], vec![RowId::from(2)], vec![]]
    );
}

#[test]
fn test_select_all_is_limited_to_page_and_restriction() {
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .enable_selection_with(
            SelectionConfig::new(SelectionMode::Multiple)
                .with_selectable([1, 2, 3, 7].map(RowId::from)),
        )
        .enable_pagination(PaginationConfig::default().with_page_size(5))
        .build();
    let mut table = Table::new(people(10), config);

    assert!(table.toggle_all_selection());
    let mut selected: Vec<RowId> = table.selected_ids().iter().cloned().collect();
    selected.sort();
    assert_eq!(selected, [1, 2, 3].map(RowId::from));
    assert!(table.view().selection.all_selected);

    assert!(!table.toggle_row_selection(4));
    assert!(table.toggle_all_selection());
    assert!(table.selected_ids().is_empty());
}

#[test]
fn test_row_clicks_and_actions() {
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let (c1, c2, c3) = (Arc::clone(&clicks), Arc::clone(&clicks), Arc::clone(&clicks));
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .on_row_click(move |r: &Record, i| c1.lock().unwrap().push(format!("click {} {i}", r.id())))
        .on_row_double_click(move |r: &Record, i| {
            c2.lock().unwrap().push(format!("double {} {i}", r.id()))
        })
        .add_action(
            Action::new("delete", "Delete", move |r: &Record, i| {
                c3.lock().unwrap().push(format!("delete {} {i}", r.id()))
            })
            .disabled_when(|r| r.id() == RowId::from(2))
            .hidden_when(|r| r.id() == RowId::from(3)),
        )
        .build();
    let table = Table::new(people(3), config);

    assert!(table.click_row(0));
    assert!(table.double_click_row(1));
    assert!(table.trigger_action("delete", 0));
    assert!(!table.trigger_action("delete", 1));
    assert!(!table.trigger_action("delete", 2));
    assert!(!table.trigger_action("archive", 0));
    assert!(!table.click_row(9));

    assert_eq!(
        *clicks.lock().unwrap(),
        vec!["click 1 0", "double 2 1", "delete 1 0"]
    );
}

// =============================================================================
// Render states and layout
// =============================================================================

#[test]
fn test_render_state_priority() {
    let mut config = people_config();
    config.loading = true;
    let mut table = Table::new(Vec::new(), config);
    assert_eq!(table.render_state(), RenderState::Loading);

    table.set_loading(false);
    assert_eq!(table.render_state(), RenderState::Empty);

    table.set_data(people(3));
    table.set_filter("name", "nobody");
    let view = table.view();
    assert_eq!(view.state, RenderState::NoResults);
    assert!(view.filter_bar.is_some());
    assert_eq!(view.empty_action.as_deref(), Some("Clear filters"));

    assert!(table.trigger_empty_action());
    assert_eq!(table.render_state(), RenderState::Normal);
}

#[test]
fn test_empty_state_action() {
    let fired = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&fired);
    let config = TableBuilder::<Record>::new()
        .add_column("name", "Name")
        .empty_state(EmptyState::new("Nothing here").action("Import", move || *sink.lock().unwrap() += 1))
        .build();
    let mut table = Table::new(Vec::new(), config);

    let view = table.view();
    assert_eq!(view.message.as_deref(), Some("Nothing here"));
    assert_eq!(view.empty_action.as_deref(), Some("Import"));
    assert!(table.trigger_empty_action());
    assert_eq!(*fired.lock().unwrap(), 1);
}

#[test]
fn test_mobile_layout_uses_cards() {
    let viewport = Viewport::new(400);
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_column("age", "Age")
        .add_column_with("email", "Email", |c| c.hide_on_mobile())
        .configure_mobile(MobileConfig::new("name").secondary("email").tertiary("age"))
        .build();
    let data = vec![Record::new(1).with("name", "Bob").with("age", 30)];
    let table = Table::with_viewport(data, config, &viewport);

    let view = table.view();
    assert_eq!(view.layout, Layout::Mobile);
    assert_eq!(view.cards[0].lines, vec!["Bob", "30"]);
    assert_eq!(render_text(&view), "Bob\n  30\n");

    viewport.resize(1300);
    let view = table.view();
    assert_eq!(view.layout, Layout::Desktop);
    assert_eq!(view.headers.len(), 3);
}

#[test]
fn test_mobile_width_without_mobile_config_drops_hidden_columns() {
    let viewport = Viewport::new(400);
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_column_with("email", "Email", |c| c.hide_on_mobile())
        .build();
    let table = Table::with_viewport(bob_ann(), config, &viewport);
    let view = table.view();
    assert_eq!(view.layout, Layout::Desktop);
    let keys: Vec<&str> = view.headers.iter().map(|h| h.key.as_str()).collect();
    assert_eq!(keys, ["name"]);
}

#[test]
fn test_filter_bar_shows_option_labels_and_errors() {
    let config = TableBuilder::new()
        .add_column("status", "Status")
        .add_column("age", "Age")
        .add_filters([
            FilterDef::select(
                "status",
                "Status",
                vec![FilterOption::new("Active", "a"), FilterOption::new("Inactive", "i")],
            ),
            FilterDef::number("age", "Age"),
        ])
        .build();
    let data = vec![Record::new(1).with("status", "a").with("age", 3)];
    let mut table = Table::new(data, config);
    table.set_filter("status", "a");
    table.set_filter("age", "x");

    let bar = table.view().filter_bar.unwrap();
    assert_eq!(bar.active_count, 2);
    assert_eq!(bar.fields[0].value, "Active");
    assert_eq!(bar.fields[1].error.as_deref(), Some("Must be a valid number"));
    assert_eq!(bar.fields[1].placeholder, "Filter by Age");
    assert!(table.toggle_filters_collapsed());
    assert!(table.view().filter_bar.unwrap().collapsed);
}

#[test]
fn test_duplicate_columns_last_wins() {
    let config = TableBuilder::new()
        .add_column("name", "First")
        .add_column("age", "Age")
        .add_column("name", "Second")
        .build();
    let table = Table::new(bob_ann(), config);
    assert_eq!(table.warnings().len(), 1);
    let labels: Vec<&str> = table.config().columns.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["Age", "Second"]);
}

#[test]
fn test_invalid_theme_falls_back_to_default() {
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .set_theme(serde_json::json!(42))
        .build();
    let table = Table::new(bob_ann(), config);
    assert_eq!(table.theme(), &tablekit::theme::TableTheme::default());
}

#[test]
fn test_theme_breakpoints_drive_layout() {
    let viewport = Viewport::new(700);
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .set_theme(serde_json::json!({ "breakpoints": { "mobile": "600px" } }))
        .build();
    let table = Table::with_viewport(bob_ann(), config, &viewport);
    assert_eq!(table.breakpoint(), Breakpoint::Tablet);
}

#[test]
fn test_set_config_keeps_engine_state() {
    let mut table = Table::new(people(20), people_config());
    table.sort_by("age");
    table.set_filter("active", true);
    let mut config = people_config();
    config.pagination = Some(PaginationConfig::default().with_page_size(3));
    table.set_config(config);
    assert_eq!(table.sort_direction("age"), Some(Direction::Asc));
    assert_eq!(table.total_items(), 10);
    assert_eq!(table.pagination().page_size(), 3);
}

// =============================================================================
// Debounced filter input
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_debounced_text_filter() {
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_filter(FilterDef::text("name", "Name"))
        .filter_debounce(Duration::from_millis(300))
        .build();
    let mut table = Table::new(bob_ann(), config);

    table.input_filter("name", "a");
    table.input_filter("name", "an");
    assert_eq!(table.filter_draft("name"), Value::from("an"));
    assert!(!table.apply_settled_filters());
    assert_eq!(table.total_items(), 2);

    tokio::time::sleep(Duration::from_millis(301)).await;
    assert!(table.apply_settled_filters());
    assert_eq!(names(&table), ["Ann"]);
}

#[tokio::test(start_paused = true)]
async fn test_settled_input_wakes_owner() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_filter(FilterDef::text("name", "Name"))
        .filter_debounce(Duration::from_millis(300))
        .on_filter_change(move |key, value| sink.lock().unwrap().push((key.to_string(), value.clone())))
        .build();
    let mut table = Table::new(bob_ann(), config);
    let settled = table.filter_input_settled();

    table.input_filter("name", "bo");
    assert_eq!(table.total_items(), 2);

    settled.notified().await;
    assert!(table.apply_settled_filters());
    assert_eq!(names(&table), ["Bob"]);
    assert_eq!(
        *changes.lock().unwrap(),
        vec![("name".to_string(), Value::from("bo"))]
    );
}

#[test]
fn test_debounced_input_without_runtime_applies_at_once() {
    let changes = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&changes);
    let config = TableBuilder::new()
        .add_column("status", "Status")
        .add_filter(FilterDef::text("status", "Status"))
        .filter_debounce(Duration::from_millis(300))
        .on_filter_change(move |_, _| *sink.lock().unwrap() += 1)
        .build();
    let rows = vec![
        Record::new(1).with("status", "active"),
        Record::new(2).with("status", "inactive"),
    ];
    let mut table = Table::new(rows, config);

    table.input_filter("status", "inact");
    assert_eq!(table.total_items(), 1);
    assert_eq!(table.rows()[0].id(), RowId::from(2));
    assert_eq!(*changes.lock().unwrap(), 1);
    assert!(!table.apply_settled_filters());
}

#[tokio::test]
async fn test_zero_debounce_applies_at_once() {
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_filter(FilterDef::text("name", "Name"))
        .filter_debounce(Duration::ZERO)
        .build();
    let mut table = Table::new(bob_ann(), config);
    table.input_filter("name", "an");
    assert_eq!(names(&table), ["Ann"]);
}

#[tokio::test(start_paused = true)]
async fn test_flush_filter_input() {
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_filter(FilterDef::text("name", "Name"))
        .filter_debounce(Duration::from_millis(300))
        .build();
    let mut table = Table::new(bob_ann(), config);
    table.input_filter("name", "bo");
    assert!(table.flush_filter_input());
    assert_eq!(names(&table), ["Bob"]);
}

#[test]
fn test_undebounced_input_applies_immediately() {
    let config = TableBuilder::new()
        .add_column("name", "Name")
        .add_filter(FilterDef::text("name", "Name"))
        .build();
    let mut table = Table::new(bob_ann(), config);
    table.input_filter("name", "bo");
    assert_eq!(names(&table), ["Bob"]);
}
