use std::sync::Arc;
use std::thread;

use surface_grid::{
    default_configs, Grid, GridRequest, QuoteField, QuoteSet, SurfaceDesk, TenorPoint,
};
use tracing_subscriber::EnvFilter;

fn seed(quotes: &[(&str, f64, f64, f64, f64, f64)]) -> Result<Vec<TenorPoint>, surface_grid::GridError> {
    quotes
        .iter()
        .map(|&(label, atm, rr10, str10, rr25, str25)| {
            TenorPoint::quoted(label, QuoteSet::new(atm, rr10, str10, rr25, str25))
        })
        .collect()
}

fn print_grid(grid: &Grid) {
    println!(
        "{} (revision {})",
        grid.instrument(),
        grid.revision()
    );
    println!(
        "  {:>5} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>5}",
        "Tenor", "Offset", "ATM", "10RR", "10STR", "25RR", "25STR", "Conf", "Extr"
    );
    for p in grid.points() {
        println!(
            "  {:>5} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.2} {:>5}",
            p.tenor_label(),
            p.offset(),
            p.atm(),
            p.risk_reversal_10(),
            p.strangle_10(),
            p.risk_reversal_25(),
            p.strangle_25(),
            p.confidence(),
            if p.extrapolated() { "yes" } else { "" }
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("surface_grid=info")),
        )
        .init();

    println!("Tenor Grid Session Demo");
    println!("=======================");

    let desk = Arc::new(SurfaceDesk::new(default_configs::standard()));
    desk.open(
        "EURUSD",
        seed(&[
            ("1M", 8.2, -0.45, 7.9, -0.25, 7.6),
            ("2M", 8.0, -0.42, 7.8, -0.23, 7.5),
            ("3M", 8.0, -0.40, 7.8, -0.21, 7.5),
            ("6M", 8.1, -0.36, 7.9, -0.19, 7.6),
            ("1Y", 8.2, -0.30, 8.0, -0.16, 7.7),
        ])?,
    )?;
    desk.open(
        "USDJPY",
        seed(&[
            ("1M", 9.4, -1.10, 9.2, -0.60, 8.9),
            ("3M", 9.7, -1.00, 9.4, -0.55, 9.1),
            ("1Y", 10.2, -0.85, 9.9, -0.46, 9.6),
        ])?,
    )?;
    desk.open(
        "GBPUSD",
        seed(&[
            ("1M", 7.6, -0.55, 7.3, -0.30, 7.1),
            ("2M", 7.7, -0.52, 7.4, -0.28, 7.2),
            ("3M", 7.8, -0.50, 7.5, -0.27, 7.3),
            ("6M", 8.0, -0.46, 7.7, -0.25, 7.5),
            ("1Y", 8.3, -0.40, 8.0, -0.22, 7.8),
        ])?,
    )?;

    // One operator per instrument, all running at once
    let sessions: Vec<(&str, Vec<GridRequest>)> = vec![
        (
            "EURUSD",
            vec![
                GridRequest::insert("4M"),
                GridRequest::insert("18M"),
                GridRequest::insert("1M"),
                GridRequest::edit(3, QuoteField::Offset, 0.5),
            ],
        ),
        (
            "USDJPY",
            vec![
                GridRequest::insert("6M"),
                GridRequest::insert("2Y"),
                GridRequest::edit(12, QuoteField::RiskReversal25, -0.5),
            ],
        ),
        (
            "GBPUSD",
            vec![
                GridRequest::insert("9M"),
                GridRequest::insert("3W"),
                GridRequest::edit(9, QuoteField::AtmRaw, 8.2),
            ],
        ),
    ];

    thread::scope(|s| {
        for (instrument, requests) in &sessions {
            let desk = Arc::clone(&desk);
            s.spawn(move || {
                for request in requests {
                    match desk.apply(instrument, request) {
                        Ok(update) => println!(
                            "{}: {} -> revision {}, smile {:?}",
                            instrument,
                            request,
                            update.grid.revision(),
                            update
                                .smile
                                .points
                                .iter()
                                .map(|p| format!("{}={:.3}", p.strike, p.volatility))
                                .collect::<Vec<_>>()
                        ),
                        Err(e) => println!("{}: {} rejected: {}", instrument, request, e),
                    }
                }
            });
        }
    });

    for instrument in desk.instruments() {
        let book = desk.book(instrument.as_str())?;
        println!();
        print_grid(&book.snapshot());
        println!("  Change log:");
        for change in book.history() {
            println!("    r{} {} | {}", change.revision, change.request, change.summary);
        }
    }

    let records = desk.snapshot("EURUSD")?.to_records();
    println!("\nEURUSD records:\n{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
