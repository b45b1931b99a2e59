use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use diffcheck_engine::{Comparison, EngineConfig, Stats, DEFAULT_STRIP};
use diffcheck_render::{render_side_by_side, render_unified, SideBySideOptions, UnifiedOptions};
use serde_json::json;
use tracing::debug;

use crate::cli::*;
use crate::grid::render_grid;
use crate::settings::Settings;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        format,
        config,
        no_color,
        ..
    } = cli;
    if no_color {
        colored::control::set_override(false);
    }
    let settings = Settings::resolve(config.as_deref())?;
    debug!(?settings, "resolved settings");

    match command {
        Command::Diff(args) => cmd_diff(&settings, args, &format),
        Command::Side(args) => cmd_side(&settings, args, &format),
        Command::Stats(args) => cmd_stats(&settings, args, &format),
    }
}

fn cmd_diff(settings: &Settings, args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (left, right) = read_inputs(&args.input.left, &args.input.right)?;
    let config = engine_config(&settings.engine, &args.input);
    let cmp = Comparison::new(&left, &right, &config)?;
    let options = unified_options(&settings.unified, &args);
    let unified = render_unified(&cmp, &options);

    match format {
        OutputFormat::Json => {
            let out = json!({
                "identical": cmp.is_identical(),
                "deadline_exceeded": cmp.deadline_exceeded(),
                "unified": unified,
                "opcodes": cmp.opcodes(),
                "stats": cmp.stats(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            warn_if_truncated(&cmp);
            match summary_line(&cmp, &config) {
                Some(line) => println!("{line}"),
                None => print!("{}", colorize_unified(&unified)),
            }
        }
    }
    Ok(())
}

fn cmd_side(settings: &Settings, args: SideArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (left, right) = read_inputs(&args.input.left, &args.input.right)?;
    let config = engine_config(&settings.engine, &args.input);
    let cmp = Comparison::new(&left, &right, &config)?;
    let options = side_options(&settings.side_by_side, &args);
    let table = render_side_by_side(&cmp, &options);

    match format {
        OutputFormat::Json => {
            let out = json!({
                "identical": cmp.is_identical(),
                "deadline_exceeded": cmp.deadline_exceeded(),
                "rows": table.rows,
                "stats": cmp.stats(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            warn_if_truncated(&cmp);
            // --full still shows identical texts, unless there is nothing to show
            let summary = summary_line(&cmp, &config)
                .filter(|_| options.context.is_some() || cmp.left().is_empty());
            match summary {
                Some(line) => println!("{line}"),
                None => {
                    let width = args.width.unwrap_or(settings.wrap_column);
                    print!("{}", render_grid(&table, width));
                }
            }
        }
    }
    Ok(())
}

fn cmd_stats(settings: &Settings, args: StatsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (left, right) = read_inputs(&args.input.left, &args.input.right)?;
    let config = engine_config(&settings.engine, &args.input);
    let cmp = Comparison::new(&left, &right, &config)?;
    let stats = cmp.stats();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            warn_if_truncated(&cmp);
            print!("{}", format_stats(&stats));
        }
    }
    Ok(())
}

/// Read both sides. A path of `-` reads standard input, which only one side
/// may use.
fn read_inputs(left: &Path, right: &Path) -> anyhow::Result<(String, String)> {
    if is_stdin(left) && is_stdin(right) {
        bail!("only one input can be read from stdin");
    }
    Ok((read_input(left)?, read_input(right)?))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Apply command-line overrides on top of the configured engine settings.
fn engine_config(base: &EngineConfig, args: &InputArgs) -> EngineConfig {
    let mut config = base.clone();
    if args.ignore_leading_ws {
        config.strip_leading = Some(DEFAULT_STRIP.to_vec());
    }
    if let Some(chars) = &args.strip_chars {
        config.strip_leading = Some(chars.chars().collect());
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout_ms = Some(ms);
    }
    config
}

fn unified_options(base: &UnifiedOptions, args: &DiffArgs) -> UnifiedOptions {
    let mut options = base.clone();
    if let Some(context) = args.context {
        options.context = context;
    }
    if let Some(label) = &args.left_label {
        options.left_label = label.clone();
    }
    if let Some(label) = &args.right_label {
        options.right_label = label.clone();
    }
    options
}

fn side_options(base: &SideBySideOptions, args: &SideArgs) -> SideBySideOptions {
    let mut options = base.clone();
    if args.full {
        options.context = None;
    } else if let Some(context) = args.context {
        options.context = Some(context);
    }
    if args.no_intraline {
        options.intraline = false;
    }
    options
}

/// The message printed instead of a diff when there is nothing to show.
fn summary_line(cmp: &Comparison<'_>, config: &EngineConfig) -> Option<String> {
    if cmp.left().is_empty() && cmp.right().is_empty() {
        return Some(format!(
            "{} Please enter text in at least one input to compare.",
            "!".yellow().bold()
        ));
    }
    if !cmp.is_identical() {
        return None;
    }
    let note = if config.strips_leading() {
        " (ignoring leading whitespace)"
    } else {
        ""
    };
    Some(format!("{} Texts are identical!{}", "✓".green().bold(), note))
}

fn warn_if_truncated(cmp: &Comparison<'_>) {
    if cmp.deadline_exceeded() {
        eprintln!(
            "{} diff timed out; some changed regions were not refined",
            "warning:".yellow().bold()
        );
    }
}

fn colorize_unified(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let styled = if line.starts_with("---") || line.starts_with("+++") {
            line.bold()
        } else if line.starts_with("@@") {
            line.cyan()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('\\') {
            line.dimmed()
        } else {
            line.normal()
        };
        out.push_str(&styled.to_string());
        out.push('\n');
    }
    out
}

fn format_stats(stats: &Stats) -> String {
    let identical = if stats.identical {
        "yes".green()
    } else {
        "no".yellow()
    };
    format!(
        "Left lines:  {}\nRight lines: {}\nEqual:       {}\nDeleted:     {}\nInserted:    {}\nSimilarity:  {:.1}%\nIdentical:   {}\n",
        stats.left_lines,
        stats.right_lines,
        stats.equal_lines,
        stats.deleted_lines.to_string().red(),
        stats.inserted_lines.to_string().green(),
        stats.similarity * 100.0,
        identical,
    )
}
