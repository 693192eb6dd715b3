use anyhow::{Context, Result};
use std::path::PathBuf;

use platerate::interval::IntervalEditor;
use platerate::io::{load_project, results_tsv, write_results_file};

/// Write the results table of a project archive
pub fn run(file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let project = load_project(&file, &IntervalEditor::default())
        .with_context(|| format!("Failed to load {}", file.display()))?;

    match output {
        Some(output) => {
            let rows = write_results_file(&project, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {} result rows -> {}", rows, output.display());
        }
        None => print!("{}", results_tsv(&project).context("Failed to format results")?),
    }

    Ok(())
}
