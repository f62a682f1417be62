
use approx::assert_relative_eq;
use surface_grid::*;
use test_utils::{create_test_config, seed_grid};

/// Inserting 4M inside [1M, 1Y] synthesizes an interior point between the
/// 3M and 6M ATM quotes.
#[test]
fn test_insert_interior_tenor_scenario() {
    let grid = seed_grid("EURUSD");
    let config = create_test_config();

    let inserted = insert_tenor(&grid, "4M", &config).expect("4M insertion failed");
    let point = &inserted.point;

    assert_eq!(point.months(), 4);
    assert_eq!(point.tenor_label(), "4M");
    assert!(!point.extrapolated());
    assert!(point.confidence() > 0.3 && point.confidence() < 1.0);
    assert_eq!(point.confidence(), 0.86);
    assert!(
        point.atm_raw() > 8.0 && point.atm_raw() < 8.1,
        "4M ATM should lie between the 3M and 6M quotes, got {}",
        point.atm_raw()
    );
    assert_relative_eq!(point.atm_raw(), 8.041337, epsilon = 1e-6);
    assert_eq!(point.atm(), point.atm_raw() + point.offset());

    for field in QuoteField::INTERPOLATED {
        assert_eq!(inserted.report.tier(field), Some(InterpTier::Cubic));
    }
    assert_eq!(inserted.grid.months(), vec![1, 2, 3, 4, 6, 12]);
}

/// Inserting 18M beyond the last quote extrapolates and lands last.
#[test]
fn test_insert_extrapolated_tenor_scenario() {
    let grid = seed_grid("EURUSD");
    let inserted = insert_tenor(&grid, "18M", &create_test_config()).unwrap();

    assert!(inserted.point.extrapolated());
    assert_eq!(inserted.point.confidence(), 0.2);
    assert_relative_eq!(inserted.point.atm_raw(), 8.3, epsilon = 1e-9);

    let last = inserted.grid.points().last().unwrap();
    assert_eq!(last.months(), 18);
    assert_eq!(
        inserted.grid.tenor_labels(),
        vec!["1M", "2M", "3M", "6M", "1Y", "18M"]
    );
}

#[test]
fn test_linear_extrapolation_beyond_last_tenor() {
    let grid = seed_grid("USDJPY");
    let inserted = insert_tenor(&grid, "2Y", &default_configs::linear_only()).unwrap();
    assert!(inserted.point.extrapolated());
    assert_eq!(inserted.point.confidence(), 0.2);
    assert_eq!(inserted.report.tier(QuoteField::AtmRaw), Some(InterpTier::Linear));
    // Linear extrapolation from the 6M-1Y segment
    assert_relative_eq!(inserted.point.atm_raw(), 10.8, epsilon = 1e-9);
}

/// Inserting an existing horizon fails and leaves the grid unchanged.
#[test]
fn test_duplicate_insert_scenario() {
    let grid = seed_grid("EURUSD");
    let before = serde_json::to_string(&grid.to_records()).unwrap();

    for label in ["1M", "12M", "1Y"] {
        let err = insert_tenor(&grid, label, &create_test_config()).unwrap_err();
        assert!(
            matches!(err, GridError::DuplicateTenor { .. }),
            "{} should be a duplicate, got {:?}",
            label,
            err
        );
    }

    assert_eq!(serde_json::to_string(&grid.to_records()).unwrap(), before);
    assert_eq!(grid.revision(), 0);
}

/// Editing the 3M offset touches only the 3M ATM level.
#[test]
fn test_offset_edit_scenario() {
    let grid = seed_grid("EURUSD");
    let edited = edit_field(&grid, 3, QuoteField::Offset, 0.5, &create_test_config()).unwrap();

    let point = edited.find("3M").unwrap();
    assert_eq!(point.offset(), 0.5);
    assert_relative_eq!(point.atm(), point.atm_raw() + 0.5);
    assert_relative_eq!(point.atm(), 8.5);

    for (before, after) in grid.points().iter().zip(edited.points()) {
        if before.months() != 3 {
            assert_eq!(before, after);
        }
    }
    // The input snapshot is untouched
    assert_eq!(grid.find("3M").unwrap().atm(), 8.0);
}

#[test]
fn test_atm_raw_edit_keeps_offset() {
    let config = create_test_config();
    let grid = seed_grid("GBPUSD");
    let grid = edit_field(&grid, 6, QuoteField::Offset, -0.2, &config).unwrap();
    let grid = edit_field(&grid, 6, QuoteField::AtmRaw, 8.4, &config).unwrap();

    let point = grid.find("6M").unwrap();
    assert_relative_eq!(point.atm(), 8.2, epsilon = 1e-12);
    assert_eq!(grid.revision(), 2);
}

#[test]
fn test_invalid_labels_are_rejected() {
    let grid = seed_grid("EURUSD");
    let config = create_test_config();
    for label in ["", "0M", "-3M", "3m", "1.5Y", "3W", "M", "10D", " 3M"] {
        assert!(
            matches!(
                insert_tenor(&grid, label, &config),
                Err(GridError::UnsupportedTenorFormat { .. })
            ),
            "label {:?} should be rejected",
            label
        );
    }
}

#[test]
fn test_smile_projection_of_seed_tenor() {
    let grid = seed_grid("EURUSD");
    let smile = project_smile(grid.find("1M").unwrap());

    let expected = [
        (StrikeLabel::Put25, 7.6),
        (StrikeLabel::Put10, 7.9),
        (StrikeLabel::Atm, 8.2),
        (StrikeLabel::Call10, 8.2 - 0.45),
        (StrikeLabel::Call25, 8.2 - 0.25),
    ];
    for (point, (strike, vol)) in smile.points.iter().zip(expected) {
        assert_eq!(point.strike, strike);
        assert_relative_eq!(point.volatility, vol, epsilon = 1e-12);
    }
}

#[test]
fn test_records_round_trip_through_json() {
    let grid = seed_grid("USDJPY");
    let inserted = insert_tenor(&grid, "9M", &create_test_config()).unwrap();

    let json = serde_json::to_value(inserted.grid.to_records()).unwrap();
    let row = &json[4];
    assert_eq!(row["tenorLabel"], "9M");
    assert_eq!(row["extrapolated"], false);
    assert_eq!(row["confidence"], 0.73);
    assert!(row.get("riskReversal10").is_some());
    assert!(row.get("atm").is_some());

    let records: Vec<TenorRecord> = serde_json::from_value(json).unwrap();
    let reloaded = Grid::from_records("USDJPY", records).unwrap();
    assert_eq!(reloaded.months(), inserted.grid.months());
    for (a, b) in reloaded.points().iter().zip(inserted.grid.points()) {
        assert_eq!(a.confidence(), b.confidence());
        assert_eq!(a.extrapolated(), b.extrapolated());
        assert_relative_eq!(a.atm(), b.atm(), epsilon = 1e-12);
        assert_relative_eq!(a.strangle_25(), b.strangle_25(), epsilon = 1e-12);
    }
}

#[test]
fn test_records_without_optional_fields() {
    let json = r#"[
        {"tenorLabel": "3M", "atmRaw": 8.0, "riskReversal10": -0.4, "strangle10": 7.8,
         "riskReversal25": -0.2, "strangle25": 7.5},
        {"tenorLabel": "12M", "offset": 0.1, "atmRaw": 8.2, "riskReversal10": -0.3,
         "strangle10": 8.0, "riskReversal25": -0.15, "strangle25": 7.7}
    ]"#;
    let records: Vec<TenorRecord> = serde_json::from_str(json).unwrap();
    let grid = Grid::from_records("EURUSD", records).unwrap();

    assert_eq!(grid.tenor_labels(), vec!["3M", "1Y"]);
    let one_year = grid.get(12).unwrap();
    assert!(one_year.is_quoted());
    assert_relative_eq!(one_year.atm(), 8.3, epsilon = 1e-12);
}

#[test]
fn test_config_file_matches_standard_preset() {
    let mut config = create_test_config();
    assert_eq!(config.history_limit, 16);
    config.history_limit = GridConfig::standard().history_limit;
    assert_eq!(config, default_configs::standard());
}
