use std::time::Instant;

use popcompute::compute::{PopResult, PopSettings, get_boundary, get_oc, select_mtd};
use popcompute::error::PopErr;
use tracing::{Level, error};

fn load_settings() -> Result<PopSettings, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("while reading {path}: {e}"))?;
            serde_json::from_str(&text).map_err(|e| format!("while parsing {path}: {e}"))
        }
        None => Ok(PopSettings::default()),
    }
}

fn print_result(result: &PopResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to serialize result: {e}"),
    }
}

fn run(settings: &PopSettings) -> Result<(), PopErr> {
    let boundary = get_boundary(
        settings.target,
        settings.n_cohort,
        settings.cohort_size,
        &settings.cutoff,
        &settings.cutoff_e,
        settings.bf_multiplier,
    )?;
    println!("Cohort boundary (n = {}):", settings.sample_size());
    for row in &boundary.cohort.rows {
        println!(
            "  n = {:>3}: escalate <= {}, de-escalate >= {}, eliminate <= {}, eliminate >= {}",
            row.n, row.escalate, row.de_escalate, row.lower_exclusion, row.upper_exclusion
        );
    }
    println!("----------------------------------------");

    let start = Instant::now();
    let oc = get_oc(settings)?;
    let duration = start.elapsed();
    println!("{} PoP sims: {:?}", settings.n_trial, duration);
    print_result(&oc.into());
    println!("----------------------------------------");

    let selection = select_mtd(settings.target, &[3, 3, 15, 9, 0], &[0, 0, 4, 4, 0])?;
    print_result(&selection.into());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&settings) {
        error!("{e}");
        std::process::exit(1);
    }
}
