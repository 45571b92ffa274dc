//! Galaxy map editor - headless driver

mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use galaxy_core::{load_map, save_map, MapFile};
use galaxy_history::{load_config, EditorConfig, EditorEvent, MapEditor};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "galaxy-editor")]
#[command(about = "Replay edit scripts against galaxy maps")]
struct Cli {
    /// Editor settings (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an edit script to a map and print the resulting history
    Replay {
        /// Map to start from; an empty map when omitted
        #[arg(long)]
        map: Option<PathBuf>,
        /// JSON list of edit steps
        #[arg(long)]
        script: PathBuf,
        /// Where to write the edited map
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a summary of a map file
    Inspect {
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "galaxy=info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::Replay { map, script, out } => replay(config, map, script, out),
        Commands::Inspect { path } => {
            let map = load_map(&path)?;
            print_map_summary(&map);
            Ok(())
        }
    }
}

fn replay(
    config: EditorConfig,
    map: Option<PathBuf>,
    script: PathBuf,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut editor = MapEditor::try_new(config)?;
    editor.subscribe(Box::new(|event: &EditorEvent| {
        tracing::debug!(event = ?event, "editor event");
    }));

    if let Some(path) = &map {
        let loaded = load_map(path)?;
        editor
            .load_map(loaded, Some(path.display().to_string()))
            .context("install map in editor")?;
    }

    let steps = script::load_script(&script)?;
    tracing::info!(steps = steps.len(), "replaying script");
    script::run_script(&mut editor, &steps)?;

    print_history(&editor);
    print_map_summary(&editor.to_map_file());

    if let Some(path) = out {
        save_map(&path, &editor.to_map_file())?;
        editor.mark_saved(path.display().to_string());
    }
    Ok(())
}

fn print_history(editor: &MapEditor) {
    println!("history ({} undoable):", editor.history().history_len());
    for (i, entry) in editor.history().history_entries().enumerate() {
        println!(
            "  {i:>3}  {:<32} group={} systems={}",
            entry.description,
            entry.action_group,
            entry.state.len()
        );
    }
    println!("redo ({} pending):", editor.history().redo_len());
    for entry in editor.history().redo_entries().rev() {
        println!("       {}", entry.description);
    }
    println!(
        "selection: [{}]  modified: {}",
        editor
            .selection()
            .keys()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        editor.is_modified()
    );
}

fn print_map_summary(map: &MapFile) {
    let lanes: usize = map.systems.iter().map(|s| s.links.len()).sum::<usize>() / 2;
    println!(
        "map: {} systems, {} lanes, {} regions",
        map.systems.len(),
        lanes,
        map.regions.len()
    );
    for region in &map.regions {
        println!("  region {:<20} {} systems", region.name, region.systems.len());
    }
}
