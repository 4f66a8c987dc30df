//! Countries command - list the master country codes.

use std::path::Path;

use colored::Colorize;
use cutover::FamilyConfig;

use super::reconcile::load_config;

pub fn run(config: Option<&Path>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config.master_countries)?);
        return Ok(());
    }

    println!(
        "{} ({})",
        "Master countries".cyan().bold(),
        config.master_countries.len().to_string().white().bold()
    );
    for line in columns(&config, 10) {
        println!("  {}", line);
    }
    Ok(())
}

/// Lay the codes out `per_line` to a row.
fn columns(config: &FamilyConfig, per_line: usize) -> Vec<String> {
    config
        .master_countries
        .chunks(per_line.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(|c| format!("{:<5}", c))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
