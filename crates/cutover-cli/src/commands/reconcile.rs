//! Family commands - load extracts, reconcile and write per-country files.

use std::path::{Path, PathBuf};

use colored::Colorize;
use cutover::{
    CountryAllowSet, Cutover, Family, FamilyConfig, FamilyInputs, ReconcileOutcome, Table,
    write_outcome,
};
use tracing::warn;

/// Options shared by every family command.
pub struct RunOptions {
    pub countries: Option<String>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

/// Load family constants from `path`, or use the defaults.
pub fn load_config(path: Option<&Path>) -> Result<FamilyConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            Ok(FamilyConfig::load(p)?)
        }
        None => Ok(FamilyConfig::default()),
    }
}

pub fn run(
    family: Family,
    files: Vec<(&'static str, &Path)>,
    options: RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let countries = options.countries.as_deref().ok_or(
        "No countries selected. Pass --countries with at least one code, e.g. --countries US,GB",
    )?;
    let allow = CountryAllowSet::parse(countries)?;

    let config = load_config(options.config.as_deref())?;
    for code in allow.iter() {
        if !config.is_master_country(code) {
            warn!(country = code, "country is not in the master list");
        }
    }
    let housekeeping = config.housekeeping_columns;
    let cutover = Cutover::new().with_families(config);

    println!(
        "{} {} for {}",
        "Reconciling".cyan().bold(),
        family.title().white().bold(),
        allow.iter().collect::<Vec<_>>().join(", ").white()
    );

    let mut tables = Vec::with_capacity(files.len());
    for (label, path) in files {
        if !path.exists() {
            return Err(format!("File not found for {}: {}", label, path.display()).into());
        }
        let (table, source) = cutover.load_table(label, path)?;
        if options.verbose {
            println!(
                "  {:8} {} ({} rows, {} columns, {})",
                label,
                path.display(),
                source.row_count,
                source.column_count,
                source.encoding
            );
        }
        tables.push(table);
    }

    let inputs = family_inputs(family, tables)?;
    let outcome = cutover.reconcile(&inputs, &allow)?;

    let output_dir = options
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}_output", family.label())));
    let written = write_outcome(&outcome, &output_dir, housekeeping)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    } else {
        print_summary(&outcome, &written);
    }
    Ok(())
}

/// Assemble typed inputs from tables loaded in command order.
fn family_inputs(
    family: Family,
    tables: Vec<Table>,
) -> Result<FamilyInputs, Box<dyn std::error::Error>> {
    let mut tables = tables.into_iter();
    let mut next = || tables.next().ok_or("missing input table");

    let inputs = match family {
        Family::I01 => FamilyInputs::I01 {
            rf: next()?,
            hos: next()?,
        },
        Family::I34 => FamilyInputs::I34 { rf: next()? },
        Family::I38 => FamilyInputs::I38 {
            rf: next()?,
            hos38: next()?,
            hos37: next()?,
        },
        Family::I51 => FamilyInputs::I51 {
            rf: next()?,
            hos37: next()?,
        },
        Family::I52 => FamilyInputs::I52 {
            rf52: next()?,
            rf51: next()?,
            hos36: next()?,
        },
        Family::I53 => FamilyInputs::I53 {
            rf: next()?,
            hos35: next()?,
        },
    };
    Ok(inputs)
}

fn print_summary(outcome: &ReconcileOutcome, written: &[PathBuf]) {
    let summary = &outcome.summary;

    println!();
    for input in &summary.inputs {
        println!(
            "  {:8} {} rows, {} in scope, {} duplicates dropped",
            input.name,
            input.rows.to_string().white(),
            input.in_scope.to_string().white(),
            input.duplicates_dropped.to_string().yellow()
        );
    }
    if summary.excluded_rows > 0 {
        println!(
            "  {} online-code rows excluded",
            summary.excluded_rows.to_string().yellow()
        );
    }
    if summary.converted_rows > 0 {
        println!(
            "  {} online records converted",
            summary.converted_rows.to_string().blue()
        );
    }
    if summary.rejected_rows > 0 {
        println!(
            "  {} rows without a HOS match",
            summary.rejected_rows.to_string().red()
        );
    }
    if outcome.differences.is_some() {
        println!(
            "  {} differences found",
            summary.differences.to_string().white().bold()
        );
    }

    println!();
    if outcome.is_empty() {
        println!(
            "{}",
            "No rows survived for the selected countries.".yellow()
        );
    } else {
        println!(
            "{} {} rows across {} countries",
            "Result:".green().bold(),
            summary.result_rows.to_string().white().bold(),
            summary.countries.len()
        );
    }

    for path in written {
        println!("  {} {}", "Wrote".green(), path.display());
    }
    println!(
        "Completed at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}
