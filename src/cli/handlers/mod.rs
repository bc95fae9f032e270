use std::error::Error;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::load_config;
use crate::io::store_io::{StorePaths, ensure_store, load_tasks};
use crate::logging;
use crate::model::board::Board;
use crate::model::config::AppConfig;
use crate::ops::stats::compute_stats;

/// Resolved locations and configuration for one run
pub struct Env {
    pub paths: StorePaths,
    pub config: AppConfig,
}

/// Resolve the config directory, start logging, create the store if
/// needed, and load config.toml.
pub fn bootstrap(cli: &Cli) -> Result<Env, Box<dyn Error>> {
    let dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => StorePaths::default_dir().ok_or("cannot determine a config directory")?,
    };
    let paths = StorePaths::new(dir);

    logging::setup_logging(&paths.log, cli.log_level.as_deref())?;
    ensure_store(&paths)?;
    let config = load_config(&paths.config);
    tracing::debug!(dir = %paths.dir.display(), "store ready");
    Ok(Env { paths, config })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, env: &Env, json: bool) -> Result<(), Box<dyn Error>> {
    let mut board = Board::new(load_tasks(&env.paths.tasks));
    let text = match command {
        Commands::List(args) => cmd_list(&mut board, args, json)?,
        Commands::Stats => cmd_stats(&mut board, json)?,
    };
    println!("{}", text);
    Ok(())
}

fn cmd_list(board: &mut Board, args: ListArgs, json: bool) -> Result<String, Box<dyn Error>> {
    let contexts = match args.context {
        Some(name) if board.has_context(&name) => vec![name],
        Some(name) => return Err(format!("no such context: {}", name).into()),
        None => board.contexts.clone(),
    };

    let positions: Vec<(String, Vec<usize>)> = contexts
        .into_iter()
        .map(|ctx| {
            let view = board.context_view(&ctx);
            (ctx, view)
        })
        .collect();
    let groups: Vec<ContextListJson> = positions
        .into_iter()
        .map(|(context, view)| ContextListJson {
            context,
            tasks: view.into_iter().map(|i| &board.tasks[i]).collect(),
        })
        .collect();

    if json {
        Ok(serde_json::to_string_pretty(&groups)?)
    } else {
        Ok(format_context_listing(&groups))
    }
}

fn cmd_stats(board: &mut Board, json: bool) -> Result<String, Box<dyn Error>> {
    let stats = compute_stats(board);
    if json {
        Ok(serde_json::to_string_pretty(&stats)?)
    } else {
        Ok(format_stats(&stats))
    }
}
