// Example: plot_smile.rs
// Seeds a grid from a quotes CSV, inserts a tenor, and renders the smile of that
// tenor next to the ATM term structure of the densified grid.
//
// Usage:
//     cargo run --example plot_smile -- [csv_path] [INSTRUMENT] [TENOR]
//
// Defaults: tests/data/fx_seed_quotes.csv EURUSD 4M
// The output image will be written to fx_smile.svg in the working directory.

use std::env;
use std::error::Error;

use csv::ReaderBuilder;
use plotters::prelude::*;
use surface_grid::{
    default_configs, insert_tenor, project_smile, Grid, QuoteSet, StrikeLabel, TenorPoint,
};

// ---------------------------------------------------------------------------
// CSV deserialization helpers
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize, Clone)]
struct CsvRow {
    instrument: String,
    tenor: String,
    #[serde(rename = "ATM")]
    atm: f64,
    #[serde(rename = "10RR")]
    rr10: f64,
    #[serde(rename = "10STR")]
    str10: f64,
    #[serde(rename = "25RR")]
    rr25: f64,
    #[serde(rename = "25STR")]
    str25: f64,
}

fn load_grid(path: &str, instrument: &str) -> Result<Grid, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut points = Vec::new();
    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        if row.instrument != instrument {
            continue;
        }
        points.push(TenorPoint::quoted(
            &row.tenor,
            QuoteSet::new(row.atm, row.rr10, row.str10, row.rr25, row.str25),
        )?);
    }
    Ok(Grid::new(instrument, points)?)
}

fn padded_range(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let lo = values.clone().fold(f64::INFINITY, f64::min);
    let hi = values.fold(f64::NEG_INFINITY, f64::max);
    let padding = ((hi - lo) * 0.1).max(0.05);
    (lo - padding, hi + padding)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let csv_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("tests/data/fx_seed_quotes.csv");
    let instrument = args.get(2).map(String::as_str).unwrap_or("EURUSD");
    let tenor = args.get(3).map(String::as_str).unwrap_or("4M");

    let grid = load_grid(csv_path, instrument)?;
    println!(
        "Loaded {} tenors for {}: {:?}",
        grid.len(),
        instrument,
        grid.tenor_labels()
    );

    let config = default_configs::standard();
    let inserted = insert_tenor(&grid, tenor, &config)?;
    let point = &inserted.point;
    println!(
        "Inserted {} | confidence {:.2} | extrapolated {} | atm {:.4}",
        point.tenor_label(),
        point.confidence(),
        point.extrapolated(),
        point.atm()
    );
    for (field, estimate) in &inserted.report.estimates {
        println!("  {:<16} {:>8.4} ({})", field.name(), estimate.value, estimate.tier);
    }

    let smile = project_smile(point);
    let smile_points: Vec<(f64, f64)> = smile
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.volatility))
        .collect();

    let term: Vec<(f64, f64, bool)> = inserted
        .grid
        .points()
        .iter()
        .map(|p| (f64::from(p.months()), p.atm(), p.is_quoted()))
        .collect();

    // Plot
    let root = SVGBackend::new("fx_smile.svg", (1280, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(640);

    let (y_min, y_max) = padded_range(smile_points.iter().map(|p| p.1));
    let mut smile_chart = ChartBuilder::on(&left)
        .margin(20)
        .caption(
            format!("{} {} smile (confidence {:.2})", instrument, smile.tenor_label, point.confidence()),
            ("sans-serif", 24),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..4.5f64, y_min..y_max)?;

    smile_chart
        .configure_mesh()
        .x_labels(5)
        .x_label_formatter(&|x| {
            StrikeLabel::ORDER
                .get(x.round() as usize)
                .map(|s| s.to_string())
                .unwrap_or_default()
        })
        .y_desc("Volatility (%)")
        .draw()?;

    smile_chart.draw_series(vec![PathElement::new(smile_points.clone(), BLUE)])?;
    smile_chart.draw_series(
        smile_points
            .iter()
            .map(|pt| Circle::new(*pt, 4, BLUE.filled())),
    )?;

    let max_months = term.iter().map(|t| t.0).fold(0.0, f64::max);
    let (y_min, y_max) = padded_range(term.iter().map(|t| t.1));
    let mut term_chart = ChartBuilder::on(&right)
        .margin(20)
        .caption(format!("{} ATM term structure", instrument), ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_months + 1.0, y_min..y_max)?;

    term_chart
        .configure_mesh()
        .x_desc("Months")
        .y_desc("ATM (%)")
        .draw()?;

    term_chart.draw_series(vec![PathElement::new(
        term.iter().map(|t| (t.0, t.1)).collect::<Vec<_>>(),
        BLACK,
    )])?;
    // Quoted tenors in black, synthesized ones in red
    term_chart.draw_series(term.iter().map(|&(x, y, quoted)| {
        let color = if quoted { BLACK } else { RED };
        Circle::new((x, y), 4, color.filled())
    }))?;

    root.present()?;
    println!("Chart saved to fx_smile.svg");
    Ok(())
}
