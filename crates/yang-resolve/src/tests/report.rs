use super::*;

#[test]
fn default_report_is_empty() {
    let report = ResolveReport::default();
    assert_eq!(report.round_count(), 0);
    assert_eq!(report.schema_items_resolved, 0);
    assert_eq!(report.data_items_resolved, 0);
}

#[test]
fn round_count_tracks_pushed_rounds() {
    let mut report = ResolveReport::default();
    report.rounds.push("round-a");
    report.rounds.push("round-a");
    report.rounds.push("round-b");
    assert_eq!(report.round_count(), 3);
}
