use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::catalog::{export_subset, format_row, load_catalog, LoadReport, EXPORT_HEADER};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::record::Movie;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::List { file }) => _list(file),
        Some(Commands::Query {
            file,
            from,
            to,
            output,
            pruned,
        }) => _query(file, from, to, output.as_deref(), *pruned),
        Some(Commands::Tree { file }) => _tree(file),
        Some(Commands::Stats { file }) => _stats(file),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(),
            ConfigCommands::Path => _config_path(),
        },
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

fn load(file: &Path, settings: &Settings) -> CliResult<LoadReport> {
    let report = load_catalog(file, settings.skip_rows)?;
    if report.skipped > 0 {
        output::warning(&format!("skipped {} bad row(s)", report.skipped));
    }
    Ok(report)
}

#[instrument]
fn _list(file: &Path) -> CliResult<()> {
    debug!("file: {:?}", file);
    let report = load(file, &Settings::load()?)?;
    for movie in report.tree.iter() {
        output::info(movie);
    }
    Ok(())
}

#[instrument]
fn _query(
    file: &Path,
    from: &str,
    to: &str,
    out_path: Option<&Path>,
    pruned: bool,
) -> CliResult<()> {
    debug!("file: {:?}, from: {:?}, to: {:?}", file, from, to);
    let settings = Settings::load()?;
    let report = load(file, &settings)?;
    let subset: Vec<&Movie> = if pruned {
        report.tree.range_subset_pruned(from, to)
    } else {
        report.tree.range_subset(from, to)
    };

    match out_path {
        Some(path) => {
            let target = settings.resolve_output(path);
            if let Some(parent) = target.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            export_subset(&target, &subset)?;
            output::action(
                "Exported",
                &format!("{} movie(s) to {}", subset.len(), target.display()),
            );
        }
        None => {
            output::info(EXPORT_HEADER);
            for movie in &subset {
                output::info(&format_row(movie));
            }
        }
    }
    Ok(())
}

#[instrument]
fn _tree(file: &Path) -> CliResult<()> {
    debug!("file: {:?}", file);
    let report = load(file, &Settings::load()?)?;
    match report.tree.to_display_tree() {
        Some(display) => output::info(&display),
        None => output::warning("catalog is empty"),
    }
    Ok(())
}

#[instrument]
fn _stats(file: &Path) -> CliResult<()> {
    debug!("file: {:?}", file);
    let report = load(file, &Settings::load()?)?;
    output::header(&format!("Catalog: {}", file.display()));
    output::detail(&format!("movies:  {}", report.tree.len()));
    output::detail(&format!("depth:   {}", report.tree.depth()));
    output::detail(&format!("loaded:  {}", report.loaded));
    output::detail(&format!("skipped: {}", report.skipped));
    Ok(())
}

#[instrument]
fn _config_show() -> CliResult<()> {
    let settings = Settings::load()?;
    output::header("Settings");
    output::detail(&format!("output_dir: {}", settings.output_dir.display()));
    output::detail(&format!("skip_rows:  {}", settings.skip_rows));
    Ok(())
}

#[instrument]
fn _config_path() -> CliResult<()> {
    match Settings::config_path() {
        Some(path) => output::info(&path.display()),
        None => output::warning("no home directory found"),
    }
    Ok(())
}

#[instrument]
fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
