use fieldtag_common::{Cell, RawGrid};
use fieldtag_engine::{CustomizationSettings, SelectionKey, build_tags, tag_count};
use fieldtag_parse::{ParseOptions, parse};

fn cells(row: &[&str]) -> Vec<Cell> {
    row.iter().map(|s| Cell::from(*s)).collect()
}

fn metals_grid() -> RawGrid {
    RawGrid::from_rows(vec![
        cells(&["Location ID", "EPA", "MW-1", "MW-1", "MW-2"]),
        cells(&["Sample Name", "", "MW-1-A", "MW-1-B", "MW-2-A"]),
        cells(&["", "", "", "", ""]),
        cells(&["Sample Date", "", "2024-01-15", "2024-03-18", "2024-01-15"]),
        cells(&["Analyte", "EPA", "", "", ""]),
        cells(&["Metals", "", "", "", ""]),
        vec![
            Cell::from("Lead"),
            Cell::Number(5.0),
            Cell::from("7.2"),
            Cell::from("4.1"),
            Cell::from("< 2.0 U"),
        ],
        vec![
            Cell::from("Arsenic"),
            Cell::Number(10.0),
            Cell::Empty,
            Cell::from("3.0"),
            Cell::from("1.0"),
        ],
        cells(&["Notes:", "", "", "", ""]),
    ])
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn lead_exceedance_end_to_end() {
    let model = parse(&metals_grid(), &ParseOptions::default()).unwrap();
    let settings = CustomizationSettings::default();

    let tags = build_tags(
        &owned(&["MW-1"]),
        &owned(&["Lead"]),
        &[SelectionKey::new("MW-1", "2024-01-15")],
        &model,
        &settings,
    );

    assert_eq!(tags.len(), 1);
    let tag = &tags[0];
    assert_eq!(tag.location, "MW-1");
    assert_eq!(tag.rows.len(), 3);

    // Location identity row spans all date columns.
    assert_eq!(tag.rows[0].values, ["MW-1", ""]);
    // Axis header: default label plus the formatted date.
    assert_eq!(tag.rows[1].values, ["Analyte", "2024-01-15"]);
    // Analyte row: value, highlighted, dominant standard.
    assert_eq!(tag.rows[2].analyte.as_deref(), Some("Lead"));
    assert_eq!(tag.rows[2].values, ["Lead", "7.2"]);
    assert_eq!(tag.rows[2].highlighted, [false, true]);
    assert_eq!(tag.rows[2].exceeded[1].as_deref(), Some("EPA"));
}

#[test]
fn missing_value_renders_blank_unhighlighted() {
    let model = parse(&metals_grid(), &ParseOptions::default()).unwrap();
    let settings = CustomizationSettings::default();

    // Arsenic has no result for MW-1 on 2024-01-15.
    let tags = build_tags(
        &owned(&["MW-1"]),
        &owned(&["Arsenic"]),
        &[SelectionKey::new("MW-1", "2024-01-15")],
        &model,
        &settings,
    );

    let row = &tags[0].rows[2];
    assert_eq!(row.values, ["Arsenic", ""]);
    assert_eq!(row.highlighted, [false, false]);
    assert_eq!(row.exceeded, [None, None]);
}

#[test]
fn build_tags_is_idempotent() {
    let model = parse(&metals_grid(), &ParseOptions::default()).unwrap();
    let mut settings = CustomizationSettings::default();
    settings.non_detect_as_nd = true;

    let locations = owned(&["MW-2", "MW-1"]);
    let analytes = owned(&["Lead", "Arsenic"]);
    let keys = vec![
        SelectionKey::new("MW-1", "2024-03-18"),
        SelectionKey::new("MW-1", "2024-01-15"),
        SelectionKey::new("MW-2", "2024-01-15"),
    ];

    let first = build_tags(&locations, &analytes, &keys, &model, &settings);
    let second = build_tags(&locations, &analytes, &keys, &model, &settings);
    assert_eq!(first, second);
}

#[test]
fn location_order_is_caller_supplied_dates_sorted() {
    let model = parse(&metals_grid(), &ParseOptions::default()).unwrap();
    let settings = CustomizationSettings::default();

    let tags = build_tags(
        &owned(&["MW-2", "MW-1"]),
        &owned(&["Lead"]),
        &[
            // Dates intentionally out of order.
            SelectionKey::new("MW-1", "2024-03-18"),
            SelectionKey::new("MW-1", "2024-01-15"),
            SelectionKey::new("MW-2", "2024-01-15"),
        ],
        &model,
        &settings,
    );

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].location, "MW-2");
    assert_eq!(tags[1].location, "MW-1");
    assert_eq!(tags[1].dates, ["2024-01-15", "2024-03-18"]);
    assert_eq!(tags[1].rows[2].values, ["Lead", "7.2", "4.1"]);
}

#[test]
fn non_detect_rewrite_disables_highlighting() {
    let model = parse(&metals_grid(), &ParseOptions::default()).unwrap();
    let mut settings = CustomizationSettings::default();
    settings.non_detect_as_nd = true;

    let tags = build_tags(
        &owned(&["MW-2"]),
        &owned(&["Lead"]),
        &[SelectionKey::new("MW-2", "2024-01-15")],
        &model,
        &settings,
    );

    let row = &tags[0].rows[2];
    assert_eq!(row.values, ["Lead", "ND"]);
    assert_eq!(row.highlighted, [false, false]);
}

#[test]
fn display_name_override_keeps_model_identity() {
    let model = parse(&metals_grid(), &ParseOptions::default()).unwrap();
    let mut settings = CustomizationSettings::default();
    settings.set_display_name("Lead", "Lead (total)");

    let tags = build_tags(
        &owned(&["MW-1"]),
        &owned(&["Lead"]),
        &[SelectionKey::new("MW-1", "2024-01-15")],
        &model,
        &settings,
    );

    let row = &tags[0].rows[2];
    assert_eq!(row.values[0], "Lead (total)");
    // The row still names the original analyte for traceability.
    assert_eq!(row.analyte.as_deref(), Some("Lead"));
}

#[test]
fn locations_without_keys_are_skipped() {
    let model = parse(&metals_grid(), &ParseOptions::default()).unwrap();
    let settings = CustomizationSettings::default();

    let locations = owned(&["MW-1", "MW-2"]);
    let keys = vec![SelectionKey::new("MW-2", "2024-01-15")];

    let tags = build_tags(&locations, &owned(&["Lead"]), &keys, &model, &settings);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].location, "MW-2");
    assert_eq!(tag_count(&locations, &keys), 1);
}

#[test]
fn depth_qualified_blocks() {
    let grid = RawGrid::from_rows(vec![
        cells(&["Location ID", "EPA", "SB-A01", "SB-A01"]),
        cells(&["Sample Name", "", "915239-SB-A1-2.0-6.0", "915239-SB-A1-6.0-9.0"]),
        cells(&["", "", "", ""]),
        cells(&["Sample Date", "", "2024-01-15", "2024-01-15"]),
        cells(&["Analyte", "EPA", "", ""]),
        cells(&["Metals", "", "", ""]),
        vec![
            Cell::from("Lead"),
            Cell::Number(5.0),
            Cell::from("2.2"),
            Cell::from("7.9"),
        ],
        cells(&["Notes:", "", "", ""]),
    ]);
    let model = parse(&grid, &ParseOptions { depth_enabled: true }).unwrap();
    let settings = CustomizationSettings::default();

    let tags = build_tags(
        &owned(&["SB-A01"]),
        &owned(&["Lead"]),
        &[
            SelectionKey::with_depth("SB-A01", "2024-01-15", "6-9"),
            SelectionKey::with_depth("SB-A01", "2024-01-15", "2-6"),
        ],
        &model,
        &settings,
    );

    assert_eq!(tags.len(), 1);
    let rows = &tags[0].rows;
    // Two blocks of four rows each; shallower interval first.
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].values, ["SB-A01", ""]);
    assert_eq!(rows[1].values, ["Date Sampled", "2024-01-15"]);
    assert_eq!(rows[2].values, ["Sample Interval", "2-6"]);
    assert_eq!(rows[3].values, ["Lead", "2.2"]);
    assert_eq!(rows[3].highlighted, [false, false]);

    assert_eq!(rows[6].values, ["Sample Interval", "6-9"]);
    assert_eq!(rows[7].values, ["Lead", "7.9"]);
    assert_eq!(rows[7].highlighted, [false, true]);
    assert_eq!(rows[7].exceeded[1].as_deref(), Some("EPA"));
}
