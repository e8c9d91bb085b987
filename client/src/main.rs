mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlCommand, ShowCommand};
use common::{get_env_usize, ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use itertools::Itertools;
use log::info;
use opening_tree::{
    CrawlOptions, LineResult, MoveSequence, PlyCache, TreeOrchestrator, DEFAULT_SNAPSHOT_DIR,
};
use provider::{ExplorerProvider, ProviderOptions};
use std::path::PathBuf;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut builder = tokio::runtime::Builder::new_multi_thread();

    builder.enable_all();

    if let Some(worker_threads) = get_env_usize("TOKIO_THREADS") {
        builder.worker_threads(worker_threads);
    }

    builder.build()?.block_on(async_main())?;

    Ok(())
}

async fn async_main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(crawl_args) => crawl(crawl_args).await?,
        Commands::Show(show_args) => show(show_args)?,
    }

    Ok(())
}

async fn crawl(args: CrawlCommand) -> Result<()> {
    let config_path = args.config.relative_to_cwd()?;
    let config = ConfigLoader::new(config_path, "crawl".to_string())?;

    let mut crawl_options: CrawlOptions = config.load()?;
    let mut provider_options: ProviderOptions = config.scoped("provider").load()?;

    let session_id = args
        .session
        .or_else(|| crawl_options.session_id.take())
        .or_else(|| provider_options.session_id.take());
    crawl_options.session_id = session_id.clone();
    provider_options.session_id = session_id;

    if let Some(max_ply) = args.max_ply {
        crawl_options.max_ply = Some(max_ply);
    }

    if let Some(recording) = args.recording {
        provider_options.recording = Some(recording.relative_to_cwd()?);
    }

    let snapshot_dir = resolve_snapshot_dir(args.snapshot_dir, &config)?;

    info!(
        "Max Ply: {}, Workers: {}, Session: {}, Snapshots: {:?}",
        crawl_options.max_ply(),
        crawl_options.workers,
        crawl_options.session_id.is_some(),
        snapshot_dir
    );

    let provider = ExplorerProvider::from_options(&provider_options)?;
    let cache = PlyCache::new(snapshot_dir)?;
    let orchestrator = TreeOrchestrator::new(provider, cache, crawl_options);

    let tree = orchestrator.build_tree().await?;

    for (ply, snapshot) in tree.iter().enumerate() {
        info!(
            "Ply {}: {} lines, {} continuations",
            ply,
            snapshot.len(),
            snapshot.num_continuations()
        );
    }

    Ok(())
}

fn show(args: ShowCommand) -> Result<()> {
    let config = ConfigLoader::new(args.config.relative_to_cwd()?, "crawl".to_string())?;
    let cache = PlyCache::new(resolve_snapshot_dir(args.snapshot_dir, &config)?)?;
    let snapshot = cache
        .load(args.ply)?
        .ok_or_else(|| anyhow!("No snapshot for ply {} in {:?}", args.ply, cache.snapshot_dir()))?;

    match args.line {
        Some(key) => {
            let sequence = MoveSequence::from_key(&key);
            let line = snapshot
                .get(&sequence)
                .ok_or_else(|| anyhow!("Line '{}' is not part of ply {}", key, args.ply))?;

            println!("{}", format_line(&sequence, line));
        }
        None => {
            for (sequence, line) in snapshot.iter() {
                println!("{}", format_line(sequence, line));
            }
        }
    }

    Ok(())
}

/// The command line wins over the config, which resolves relative to the config file.
fn resolve_snapshot_dir(arg: Option<String>, config: &ConfigLoader) -> Result<PathBuf> {
    match arg {
        Some(dir) => dir.relative_to_cwd(),
        None => config
            .get_relative_path("snapshot_dir")
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_DIR))
            .relative_to_cwd(),
    }
}

fn format_line(sequence: &MoveSequence, line: &LineResult) -> String {
    format!(
        "{}: {}",
        sequence,
        line.continuations()
            .map(|(san, coord, proba)| format!("{} ({}) {:.1}%", san, coord, proba * 100.0))
            .join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(contents: &str) -> (tempfile::TempDir, ConfigLoader) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opening_tree.conf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(contents.as_bytes())
            .unwrap();

        let config = ConfigLoader::new(&path, "crawl".to_string()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_snapshot_dir_from_config_is_relative_to_the_config_file() {
        let (dir, config) = config("crawl { snapshot_dir = \"snapshots\" }\n");

        assert_eq!(
            resolve_snapshot_dir(None, &config).unwrap(),
            dir.path().join("snapshots")
        );
    }

    #[test]
    fn test_crawl_and_show_agree_on_snapshot_dir() {
        let (dir, _) = config("crawl { snapshot_dir = \"plies\" }\n");
        let conf = dir.path().join("opening_tree.conf");

        let crawl = Cli::parse_from(["opening-tree", "crawl", "-c", conf.to_str().unwrap()]);
        let show = Cli::parse_from(["opening-tree", "show", "-c", conf.to_str().unwrap(), "0"]);

        let resolve = |config_path: String, snapshot_dir: Option<String>| {
            let config = ConfigLoader::new(config_path, "crawl".to_string()).unwrap();
            resolve_snapshot_dir(snapshot_dir, &config).unwrap()
        };

        let crawl_dir = match crawl.command {
            Commands::Crawl(args) => resolve(args.config, args.snapshot_dir),
            Commands::Show(_) => unreachable!(),
        };
        let show_dir = match show.command {
            Commands::Show(args) => resolve(args.config, args.snapshot_dir),
            Commands::Crawl(_) => unreachable!(),
        };

        assert_eq!(crawl_dir, dir.path().join("plies"));
        assert_eq!(show_dir, crawl_dir);
    }

    #[test]
    fn test_snapshot_dir_argument_wins() {
        let (dir, config) = config("crawl { snapshot_dir = \"snapshots\" }\n");
        let explicit = dir.path().join("elsewhere");

        assert_eq!(
            resolve_snapshot_dir(Some(explicit.to_str().unwrap().to_string()), &config).unwrap(),
            explicit
        );
    }

    #[test]
    fn test_snapshot_dir_default() {
        let (_dir, config) = config("crawl { workers = 2 }\n");

        assert!(resolve_snapshot_dir(None, &config)
            .unwrap()
            .ends_with(DEFAULT_SNAPSHOT_DIR));
    }
}
