use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lineup_tool::{
    FixedOffsetSource, LineupConfig, RawGrid, ScheduleError, TzDatabase, format_local_hm,
    reconstruct,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn grid(rows: &[&[&str]]) -> RawGrid {
    RawGrid::from_rows(rows.iter().map(|r| r.to_vec()))
}

fn single_stage(values: &[&str]) -> RawGrid {
    let mut rows: Vec<Vec<&str>> = vec![vec!["Main"]];
    rows.extend(values.iter().map(|v| vec![*v]));
    RawGrid::from_rows(rows)
}

fn maximal_runs(values: &[&str]) -> usize {
    let mut runs = 0;
    let mut previous = "";
    for value in values {
        if !value.is_empty() && *value != previous {
            runs += 1;
        }
        previous = *value;
    }
    runs
}

#[test]
fn yheti_then_gap_then_liquid_stranger() {
    let grid = single_stage(&["Yheti", "Yheti", "", "Liquid Stranger"]);
    let config = LineupConfig::default();
    let result = reconstruct(&grid, d(2025, 9, 19), &config, &TzDatabase).unwrap();

    assert_eq!(result.sets.len(), 2);
    let yheti = &result.sets[0];
    assert_eq!(
        (yheti.stage.as_str(), yheti.artist.as_str()),
        ("Main", "Yheti")
    );
    assert_eq!(yheti.start, utc(2025, 9, 19, 17, 0));
    assert_eq!(yheti.end, utc(2025, 9, 19, 17, 30));

    let closer = &result.sets[1];
    assert_eq!(closer.artist, "Liquid Stranger");
    assert_eq!(closer.start, utc(2025, 9, 19, 17, 45));
    // 23:59 EDT on the session date
    assert_eq!(closer.end, utc(2025, 9, 20, 3, 59));
}

#[test]
fn same_artist_on_adjacent_rows_is_one_set() {
    let grid = single_stage(&["Rezz", "Rezz", "Rezz", "Rezz"]);
    let result = reconstruct(
        &grid,
        d(2025, 9, 19),
        &LineupConfig::default(),
        &FixedOffsetSource::utc(),
    )
    .unwrap();
    assert_eq!(result.sets.len(), 1);
    assert_eq!(result.sets[0].start, utc(2025, 9, 19, 13, 0));
}

#[test]
fn artist_returning_after_a_gap_gets_a_second_set() {
    let values = ["Zeds Dead", "", "Zeds Dead", "Zeds Dead", ""];
    let result = reconstruct(
        &single_stage(&values),
        d(2025, 9, 19),
        &LineupConfig::default(),
        &FixedOffsetSource::utc(),
    )
    .unwrap();
    assert_eq!(result.sets.len(), 2);
    assert_eq!(result.sets[1].start, utc(2025, 9, 19, 13, 30));
    assert_eq!(result.sets[1].end, utc(2025, 9, 19, 14, 0));
}

#[test]
fn set_count_matches_maximal_runs() {
    let columns: [&[&str]; 5] = [
        &["A", "A", "B", "B", "", "A", "A"],
        &["", "", "", ""],
        &["A", "B", "A", "B"],
        &["", "A", "", "A", "", "A"],
        &["A", "", "", "", "", "", "", "", "A"],
    ];
    for values in columns {
        let result = reconstruct(
            &single_stage(values),
            d(2025, 9, 19),
            &LineupConfig::default(),
            &FixedOffsetSource::utc(),
        )
        .unwrap();
        assert_eq!(result.sets.len(), maximal_runs(values), "column {values:?}");
        for set in &result.sets {
            assert!(set.start < set.end, "{set:?}");
        }
    }
}

#[test]
fn last_row_only_column_ends_at_sentinel() {
    let grid = grid(&[&["Main", "Side"], &["A", ""], &["A", ""], &["", "Closer"]]);
    let result = reconstruct(
        &grid,
        d(2025, 9, 19),
        &LineupConfig::default(),
        &FixedOffsetSource::utc(),
    )
    .unwrap();

    let side: Vec<_> = result.sets.iter().filter(|s| s.stage == "Side").collect();
    assert_eq!(side.len(), 1);
    assert_eq!(side[0].start, utc(2025, 9, 19, 13, 30));
    assert_eq!(side[0].end, utc(2025, 9, 19, 23, 59));
}

#[test]
fn set_opening_after_midnight_ends_at_its_own_dates_sentinel() {
    let mut rows: Vec<Vec<&str>> = vec![vec!["Main", "Late"]];
    rows.extend((0..45).map(|_| vec!["A", ""]));
    rows.push(vec!["", "Afterparty"]);
    let grid = RawGrid::from_rows(rows);

    let result = reconstruct(&grid, d(2025, 9, 19), &LineupConfig::default(), &TzDatabase).unwrap();
    assert_eq!(result.row_times[45].label(), "24:15");

    let main = result.sets.iter().find(|s| s.stage == "Main").unwrap();
    assert_eq!(main.start, utc(2025, 9, 19, 17, 0));
    assert_eq!(main.end, utc(2025, 9, 20, 4, 15));

    let late = result.sets.iter().find(|s| s.stage == "Late").unwrap();
    assert_eq!(late.artist, "Afterparty");
    // 00:15 EDT, then 23:59 EDT, both on Sep 20
    assert_eq!(late.start, utc(2025, 9, 20, 4, 15));
    assert_eq!(late.end, utc(2025, 9, 21, 3, 59));

    assert!(result.sets.iter().all(|s| s.start < s.end));
}

#[test]
fn empty_stage_column_produces_no_sets() {
    let grid = grid(&[&["Main", "Side"], &["A", ""], &["", ""], &["B", ""]]);
    let result = reconstruct(
        &grid,
        d(2025, 9, 19),
        &LineupConfig::default(),
        &FixedOffsetSource::utc(),
    )
    .unwrap();
    assert_eq!(result.stage_names(), vec!["Main", "Side"]);
    assert!(result.sets.iter().all(|s| s.stage == "Main"));
    assert_eq!(result.sets.len(), 2);
}

#[test]
fn fallback_applies_when_every_label_is_ignored() {
    let grid = grid(&[&["", "x"], &["A", "B"]]);
    let mut config = LineupConfig::default();
    config.ignored_headers = vec!["x".into()];
    let result = reconstruct(&grid, d(2025, 9, 19), &config, &FixedOffsetSource::utc()).unwrap();
    assert_eq!(result.stage_names(), vec!["Stage 1", "x"]);
    assert_eq!(result.sets.len(), 2);
}

#[test]
fn two_empty_header_labels_become_stage_one_and_two() {
    let grid = grid(&[&["", "", "Notes"], &["A", "C", ""], &["B", "C", ""]]);
    let mut config = LineupConfig::default();
    config.ignored_headers = vec!["Notes".into()];
    let result = reconstruct(&grid, d(2025, 9, 19), &config, &FixedOffsetSource::utc()).unwrap();

    assert_eq!(result.stage_names(), vec!["Stage 1", "Stage 2", "Notes"]);
    let stage_one: Vec<_> = result.sets.iter().filter(|s| s.stage == "Stage 1").collect();
    let stage_two: Vec<_> = result.sets.iter().filter(|s| s.stage == "Stage 2").collect();
    assert_eq!(stage_one.len(), 2);
    assert_eq!(stage_two.len(), 1);
}

#[test]
fn ignored_headers_are_not_stages() {
    let grid = grid(&[&["Time", "Main"], &["1pm", "A"], &["1:15pm", "A"]]);
    let mut config = LineupConfig::default();
    config.ignored_headers = vec!["Time".into()];
    let result = reconstruct(&grid, d(2025, 9, 19), &config, &FixedOffsetSource::utc()).unwrap();
    assert_eq!(result.stage_names(), vec!["Main"]);
    assert_eq!(result.sets.len(), 1);
}

#[test]
fn sets_are_sorted_by_start_with_column_order_for_ties() {
    let grid = grid(&[
        &["West", "East"],
        &["", "Opener"],
        &["Late", "Opener"],
        &["Late", ""],
        &["", "Tie East"],
    ]);
    let mut grid_rows: Vec<Vec<String>> = grid.rows().to_vec();
    grid_rows[4][0] = "Tie West".into();
    let grid = RawGrid::from_rows(grid_rows);

    let result = reconstruct(
        &grid,
        d(2025, 9, 19),
        &LineupConfig::default(),
        &FixedOffsetSource::utc(),
    )
    .unwrap();
    let order: Vec<&str> = result.sets.iter().map(|s| s.artist.as_str()).collect();
    assert_eq!(order, vec!["Opener", "Late", "Tie West", "Tie East"]);
}

#[test]
fn blank_rows_still_advance_the_clock() {
    let grid = single_stage(&["", "", "", "", "Late"]);
    let result = reconstruct(
        &grid,
        d(2025, 9, 19),
        &LineupConfig::default(),
        &FixedOffsetSource::utc(),
    )
    .unwrap();
    assert_eq!(result.row_times.len(), 5);
    assert_eq!(result.sets[0].start, utc(2025, 9, 19, 14, 0));
}

#[test]
fn row_times_round_trip_through_zone() {
    let values = vec!["A"; 48];
    let result = reconstruct(
        &single_stage(&values),
        d(2025, 9, 19),
        &LineupConfig::default(),
        &TzDatabase,
    )
    .unwrap();
    for time in &result.row_times {
        assert_eq!(
            format_local_hm(time.instant, "America/New_York").unwrap(),
            time.local.format("%H:%M").to_string()
        );
    }
    let last = result.row_times.last().unwrap();
    assert_eq!(last.label(), "24:45");
    assert_eq!(last.local, d(2025, 9, 20).and_hms_opt(0, 45, 0).unwrap());
}

#[test]
fn custom_clock_and_injected_offset() {
    let mut config = LineupConfig::default();
    config.start_hour = 18;
    config.start_minute = 30;
    config.slot_minutes = 30;
    let result = reconstruct(
        &single_stage(&["A", "B", ""]),
        d(2025, 6, 21),
        &config,
        &FixedOffsetSource::new(60),
    )
    .unwrap();
    assert_eq!(result.sets[0].start, utc(2025, 6, 21, 17, 30));
    assert_eq!(result.sets[1].start, utc(2025, 6, 21, 18, 0));
    assert_eq!(result.sets[1].end, utc(2025, 6, 21, 18, 30));
}

#[test]
fn zero_slot_and_unknown_zone_are_rejected() {
    let grid = single_stage(&["A"]);
    let mut config = LineupConfig::default();
    config.slot_minutes = 0;
    assert!(matches!(
        reconstruct(&grid, d(2025, 9, 19), &config, &TzDatabase),
        Err(ScheduleError::Config(_))
    ));

    let mut config = LineupConfig::default();
    config.timezone = "Europe/Nowhere".into();
    assert!(matches!(
        reconstruct(&grid, d(2025, 9, 19), &config, &TzDatabase),
        Err(ScheduleError::Timezone(_))
    ));
}

#[test]
fn header_only_grid_has_no_rows_or_sets() {
    let result = reconstruct(
        &single_stage(&[]),
        d(2025, 9, 19),
        &LineupConfig::default(),
        &TzDatabase,
    )
    .unwrap();
    assert!(result.row_times.is_empty());
    assert!(result.sets.is_empty());
}
