// ==========================================
// CsvProductionSource integration tests
// ==========================================
// Export directory -> CsvProductionSource -> DashboardApi
// ==========================================

mod test_helpers;

use cycle_radar::api::{ApiError, DashboardApi};
use cycle_radar::config::AnalyticsConfig;
use cycle_radar::repository::{
    CsvProductionSource, CycleQuery, ProductionDataSource, RepositoryError,
};
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::write_export;

const CYCLES_CSV: &str = "\
id,branch_id,week_start,week_end,cancelled,sent_at,completed_at
1,10,2025-02-03,2025-02-09,false,2025-01-31 09:00:00,
2,10,2025-02-10,2025-02-16,0,,
3,20,2025-02-10,2025-02-16,1,,
4,20,2025-02-17,2025-02-23,,,
";

const RECORDS_CSV: &str = "\
cycle_id,record_date,planned_quantity,realized_quantity,reference_cost,realized_cost,efficiency
2,2025-02-11,100,130,,,
1,2025-02-04,60,61,12.5,,
1,2025-02-03,40,40,,,
3,2025-02-10,100,20,,,

4,2025-02-17,,,,,
4,2025-02-18,abc,10,,,
";

fn create_export(with_additions: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path(), "cycles.csv", CYCLES_CSV).unwrap();
    write_export(dir.path(), "daily_records.csv", RECORDS_CSV).unwrap();
    if with_additions {
        write_export(
            dir.path(),
            "additions.csv",
            "id,cycle_id,branch_id,reason,detail_total_value\n1,2,10,holiday,99.5\n",
        )
        .unwrap();
    }
    dir
}

#[tokio::test]
async fn test_fetch_cycles_ordering_and_filters() {
    let dir = create_export(false);
    let source = CsvProductionSource::new(dir.path());

    let all = source.fetch_cycles(&CycleQuery::all()).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|c| c.id).collect();
    // week_start desc, then id desc
    assert_eq!(ids, vec![4, 3, 2, 1]);
    assert!(all[0].sent_at.is_none());
    assert!(all[3].sent_at.is_some());

    let active = source.fetch_cycles(&CycleQuery::default()).await.unwrap();
    let ids: Vec<i64> = active.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![4, 2, 1]);

    let one = source.fetch_cycle(3).await.unwrap().unwrap();
    assert!(one.cancelled);
    assert!(source.fetch_cycle(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_records_sorted_and_tolerant() {
    let dir = create_export(false);
    let source = CsvProductionSource::new(dir.path());

    let records = source.fetch_daily_records(Some(1)).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].planned_quantity, Some(40.0));
    assert_eq!(records[1].reference_cost, Some(12.5));

    // blank line skipped, bad numeric cells read as None
    let records = source.fetch_daily_records(Some(4)).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.planned_quantity.is_none()));

    assert!(source.fetch_additions(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_from_export() {
    let dir = create_export(true);
    let api = DashboardApi::new(
        Arc::new(CsvProductionSource::new(dir.path())),
        AnalyticsConfig::default(),
    );

    let summary = api.compute_fleet_summary().await.unwrap();
    // cycle 3 cancelled, cycle 4 has nothing planned
    assert_eq!(summary.analyzed_cycle_count, 2);
    assert_eq!(summary.assertive_cycle_count, 1);
    assert_eq!(summary.total_deficits, 1);
    assert_eq!(summary.alerts.len(), 1);
    assert_eq!(summary.alerts[0].cycle_id, 2);
    assert_eq!(summary.branches.len(), 1);
    assert_eq!(summary.branches[0].accuracy_pct, 50.0);

    let detail = api.get_cycle_detail(2).await.unwrap();
    assert_eq!(detail.additions.len(), 1);
    assert_eq!(detail.additions[0].detail_total_value, Some(99.5));
}

#[tokio::test]
async fn test_non_finite_cells_read_as_missing() {
    let dir = create_export(false);
    write_export(
        dir.path(),
        "daily_records.csv",
        "cycle_id,record_date,planned_quantity,realized_quantity\n\
         1,2025-02-03,100,NaN\n\
         2,2025-02-10,200,150\n\
         2,2025-02-11,inf,-inf\n",
    )
    .unwrap();
    let source = CsvProductionSource::new(dir.path());

    let records = source.fetch_daily_records(Some(1)).await.unwrap();
    assert_eq!(records[0].realized_quantity, None);
    let records = source.fetch_daily_records(Some(2)).await.unwrap();
    assert_eq!(records[1].planned_quantity, None);
    assert_eq!(records[1].realized_quantity, None);

    let api = DashboardApi::new(Arc::new(source), AnalyticsConfig::default());
    let summary = api.compute_fleet_summary().await.unwrap();
    // cycle 1: realized counts as 0, a -100% surplus; cycle 2: -25%
    assert_eq!(summary.analyzed_cycle_count, 2);
    assert_eq!(summary.total_surpluses, 2);
    assert_eq!(summary.total_estimated_waste_cost, (100.0 + 50.0) * 12.0);
    assert_eq!(summary.average_surplus_pct, 62.5);
}

#[tokio::test]
async fn test_bad_identifier_is_field_error() {
    let dir = create_export(false);
    write_export(
        dir.path(),
        "cycles.csv",
        "id,branch_id,week_start,week_end\nx,10,2025-02-03,2025-02-09\n",
    )
    .unwrap();
    let source = CsvProductionSource::new(dir.path());

    let err = source.fetch_cycles(&CycleQuery::all()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::FieldValueError { ref field, .. } if field == "id"));
}

#[tokio::test]
async fn test_missing_export_dir_fails_whole_run() {
    let dir = tempfile::tempdir().unwrap();
    let api = DashboardApi::new(
        Arc::new(CsvProductionSource::new(dir.path().join("nowhere"))),
        AnalyticsConfig::default(),
    );

    let err = api.compute_fleet_summary().await.unwrap_err();
    assert!(matches!(err, ApiError::DataSourceError(_)));
}
