use super::*;
use crate::interval::IntervalEditor;
use crate::well::{WellRecord, CONTROL_SAMPLE_ID};

fn fitted(well_id: &str, sample_id: &str, rate: f64) -> WellRecord {
    let time = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let signal = time.iter().map(|t| 10.0 + rate * t).collect();
    let mut well = WellRecord::new(well_id, sample_id, time, signal).unwrap();
    IntervalEditor::default().initialize(&mut well).unwrap();
    well
}

fn partial_plate() -> Plate {
    let wells = (1..=5)
        .map(|i| fitted(&format!("A{i}"), &format!("S{i}"), i as f64))
        .collect();
    Plate::new("Plate 1", "run.csv", PlateFormat::Wells96, wells)
}

#[test]
fn test_index_to_well_corners() {
    let f96 = PlateFormat::Wells96;
    assert_eq!(index_to_well(1, f96).unwrap(), "A1");
    assert_eq!(index_to_well(12, f96).unwrap(), "A12");
    assert_eq!(index_to_well(13, f96).unwrap(), "B1");
    assert_eq!(index_to_well(96, f96).unwrap(), "H12");

    let f384 = PlateFormat::Wells384;
    assert_eq!(index_to_well(24, f384).unwrap(), "A24");
    assert_eq!(index_to_well(25, f384).unwrap(), "B1");
    assert_eq!(index_to_well(384, f384).unwrap(), "P24");
}

#[test]
fn test_round_trip_all_positions() {
    for format in [PlateFormat::Wells96, PlateFormat::Wells384] {
        for i in 1..=format.wells() {
            let well = index_to_well(i, format).unwrap();
            assert_eq!(well_to_index(&well, format).unwrap(), i);
        }
    }
}

#[test]
fn test_invalid_coordinates() {
    let f96 = PlateFormat::Wells96;
    assert!(index_to_well(0, f96).is_err());
    assert!(index_to_well(97, f96).is_err());
    assert!(well_to_index("I1", f96).is_err());
    assert!(well_to_index("A13", f96).is_err());
    assert!(well_to_index("A0", f96).is_err());
    assert!(well_to_index("", f96).is_err());
    assert!(well_to_index("11", f96).is_err());
    assert_eq!(well_to_index("p24", PlateFormat::Wells384).unwrap(), 384);
    assert_eq!(well_to_index("b07", f96).unwrap(), 19);
}

#[test]
fn test_format_parsing() {
    assert_eq!("384".parse::<PlateFormat>().unwrap(), PlateFormat::Wells384);
    assert!("48".parse::<PlateFormat>().is_err());
    assert_eq!(PlateFormat::for_well_count(100).unwrap(), PlateFormat::Wells384);
    assert_eq!(PlateFormat::Wells96.to_string(), "96");
}

#[test]
fn test_heatmap_missing_well_is_nan() {
    let plate = partial_plate();
    let map = heatmap(&plate);

    assert_eq!(map.cells.len(), 96);
    let b1 = map.cell_at("B1").unwrap();
    assert!(b1.slope.is_nan());
    assert!(!b1.has_record());
    assert!(b1.sample_id.is_none());

    let a3 = map.cell_at("A3").unwrap();
    assert!((a3.slope - 3.0).abs() < 1e-9);
    assert_eq!(a3.sample_id.as_deref(), Some("S3"));
    assert_eq!(a3.record, Some(2));
}

#[test]
fn test_heatmap_value_range() {
    let map = heatmap(&partial_plate());
    let (lo, hi) = map.value_range().unwrap();
    assert!((lo - 1.0).abs() < 1e-9);
    assert!((hi - 5.0).abs() < 1e-9);
}

#[test]
fn test_heatmap_row_column_access() {
    let map = heatmap(&partial_plate());
    assert_eq!(map.cell_rc(0, 4).unwrap().well_id, "A5");
    assert_eq!(map.cell_rc(1, 0).unwrap().well_id, "B1");
    assert!(map.cell_rc(8, 0).is_none());
}

#[test]
fn test_heatmap_includes_controls() {
    let mut wells = vec![fitted("A1", "S1", 1.0)];
    wells.push(fitted("A2", CONTROL_SAMPLE_ID, 0.5));
    let plate = Plate::new("p", "f", PlateFormat::Wells96, wells);
    let map = heatmap(&plate);
    assert!(map.cell_at("A2").unwrap().has_value());
}

#[test]
fn test_scatter_one_point_per_record() {
    let plate = partial_plate();
    let points = scatter(&plate);
    assert_eq!(points.len(), 5);
    assert_eq!(points[4].well_id, "A5");
    assert_eq!(points[4].x, 5);
    assert!((points[4].slope - 5.0).abs() < 1e-9);
    assert!(points[4].slope_uncertainty.abs() < 1e-6);
}

#[test]
fn test_reference_stats() {
    let wells = vec![
        fitted("A1", CONTROL_SAMPLE_ID, 1.0),
        fitted("A2", CONTROL_SAMPLE_ID, 3.0),
        fitted("A3", "S", 100.0),
    ];
    let plate = Plate::new("p", "f", PlateFormat::Wells96, wells);
    let stats = reference_stats(&plate);
    assert_eq!(stats.count, 2);
    assert!((stats.mean_slope - 2.0).abs() < 1e-9);
    assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-9);

    let stats = reference_stats(&partial_plate());
    assert_eq!(stats.count, 0);
    assert!(stats.mean_slope.is_nan());
}

#[test]
fn test_find_is_coordinate_aware() {
    let plate = partial_plate();
    assert_eq!(plate.find("a03"), Some(2));
    assert_eq!(plate.find("B1"), None);
    assert_eq!(plate.result_indices().count(), 5);
}
