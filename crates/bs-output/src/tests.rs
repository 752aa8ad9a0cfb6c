//! Integration tests for bs-output.

use bs_sim::Phase;

use crate::row::{StationSnapshotRow, StepSummaryRow};

fn snap_row(station_id: u32, step: u64, phase: Phase) -> StationSnapshotRow {
    StationSnapshotRow {
        station_id,
        step,
        phase,
        total_capacity: 20,
        spaces_free:    station_id * 2,
        full_count:     station_id as u64,
        empty_count:    0,
    }
}

fn summary_row(step: u64) -> StepSummaryRow {
    StepSummaryRow {
        step,
        riders:            20,
        dropped:           1,
        unmatched:         2,
        truck_bikes_moved: 6,
        total_full:        step * 3,
        total_empty:       step,
        total_bikes:       450,
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("station_snapshots.csv").exists());
        assert!(dir.path().join("step_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("station_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["station_id", "step", "phase", "total_capacity", "spaces_free", "full_count", "empty_count"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["step", "riders", "dropped", "unmatched", "truck_bikes_moved", "total_full", "total_empty", "total_bikes"]
        );
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![
            snap_row(0, 5, Phase::Demand),
            snap_row(1, 5, Phase::Demand),
            snap_row(1, 5, Phase::Rebalance),
        ];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("station_snapshots.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "0");         // station_id
        assert_eq!(&read_rows[0][1], "5");         // step
        assert_eq!(&read_rows[0][2], "demand");
        assert_eq!(&read_rows[1][4], "2");         // spaces_free
        assert_eq!(&read_rows[2][2], "rebalance");
    }

    #[test]
    fn csv_step_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_step_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");     // step
        assert_eq!(&read_rows[0][4], "6");     // truck_bikes_moved
        assert_eq!(&read_rows[0][5], "9");     // total_full
        assert_eq!(&read_rows[0][7], "450");   // total_bikes
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        use bs_core::{DemandInterval, Occupancy, RankMode, SimConfig, TruckConfig};
        use bs_network::StationNetworkBuilder;
        use bs_sim::SimBuilder;

        use crate::observer::SimOutputObserver;

        let config = SimConfig {
            steps:             4,
            seed:              1,
            riders_per_step:   3,
            rank_mode:         RankMode::Am,
            demand_interval:   DemandInterval { low: 0.1, high: 0.9 },
            truck:             TruckConfig { runs: 1, ..TruckConfig::default() },
            snapshot_interval: 2,
            ..SimConfig::default()
        };

        let mut b = StationNetworkBuilder::new();
        let s: Vec<_> = (0..3).map(|_| b.add_station()).collect();
        b.add_edge(s[1], s[0]);
        b.add_edge(s[2], s[0]);
        b.add_edge(s[0], s[1]);
        let occupancy = vec![Some(Occupancy::half_free(20)); 3];

        let mut sim = SimBuilder::new(config.clone(), b.build())
            .occupancy(occupancy)
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // snapshot_interval = 2 → steps 0 and 2, two phases each, 3 stations.
        let mut rdr = csv::Reader::from_path(dir.path().join("station_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 12, "expected 2 steps × 2 phases × 3 stations, got {}", rows.len());
        assert_eq!(&rows[0][2], "demand");
        assert_eq!(&rows[3][2], "rebalance");

        let mut rdr = csv::Reader::from_path(dir.path().join("step_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3][7], sim.stations.total_bikes().to_string());
    }
}

// ── Observer error handling ───────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use bs_core::{Occupancy, RankMode, SimConfig};
    use bs_network::StationNetworkBuilder;
    use bs_sim::SimBuilder;

    use super::*;
    use crate::observer::SimOutputObserver;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Rejects every step summary; counts how often it was asked.
    #[derive(Default)]
    struct BrokenDisk {
        summary_calls: u32,
    }

    impl OutputWriter for BrokenDisk {
        fn write_snapshots(&mut self, _rows: &[StationSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }

        fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
            self.summary_calls += 1;
            Err(std::io::Error::other(format!("disk full at step {}", row.step)).into())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_survives_the_run() {
        let config = SimConfig {
            steps:           3,
            riders_per_step: 2,
            rank_mode:       RankMode::Am,
            ..SimConfig::default()
        };
        let mut b = StationNetworkBuilder::new();
        let s: Vec<_> = (0..3).map(|_| b.add_station()).collect();
        b.add_edge(s[1], s[0]);
        b.add_edge(s[2], s[0]);
        let mut sim = SimBuilder::new(config.clone(), b.build())
            .occupancy(vec![Some(Occupancy::half_free(20)); 3])
            .build()
            .unwrap();

        let mut obs = SimOutputObserver::new(BrokenDisk::default(), &config);
        let summary = sim.run(&mut obs);
        assert_eq!(summary.steps, 3);

        match obs.take_error() {
            Some(OutputError::Io(e)) => assert_eq!(e.to_string(), "disk full at step 0"),
            other => panic!("expected the step-0 I/O error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().summary_calls, 3);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let rows = vec![
            snap_row(0, 1, Phase::Demand),
            snap_row(1, 1, Phase::Demand),
            snap_row(2, 1, Phase::Rebalance),
        ];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM station_snapshots", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_phase_as_text() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(4, 0, Phase::Rebalance)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (phase, free): (String, i64) = conn.query_row(
            "SELECT phase, spaces_free FROM station_snapshots WHERE station_id = 4",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        ).unwrap();
        assert_eq!(phase, "rebalance");
        assert_eq!(free, 8);
    }

    #[test]
    fn sqlite_step_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_step_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (step, full, bikes): (i64, i64, i64) = conn.query_row(
            "SELECT step, total_full, total_bikes FROM step_summaries WHERE step = 7",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(step, 7);
        assert_eq!(full, 21);
        assert_eq!(bikes, 450);
    }

    #[test]
    fn sqlite_duplicate_step_rejected() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_step_summary(&summary_row(1)).unwrap();
        assert!(w.write_step_summary(&summary_row(1)).is_err());
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("station_snapshots.parquet").exists());
        assert!(dir.path().join("step_summaries.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_rows_and_schema() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 2, Phase::Demand), snap_row(1, 2, Phase::Rebalance)])
            .unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("station_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 2, "expected 2 rows");

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            field_names,
            ["station_id", "step", "phase", "total_capacity", "spaces_free", "full_count", "empty_count"]
        );
        assert_eq!(*schema.field_with_name("phase").unwrap().data_type(), DataType::Utf8);
    }

    #[test]
    fn parquet_finish_required() {
        // Dropping the writer without finish() leaves the footer unwritten.
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[snap_row(0, 0, Phase::Demand)]).unwrap();
        }

        let file = std::fs::File::open(dir.path().join("station_snapshots.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
