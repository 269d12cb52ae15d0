use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use quotebook::model::{ALL_CATEGORIES, RemoteConfig};
use quotebook::remote::HttpRemote;
use quotebook::schedule::PeriodicSync;
use quotebook::store::{EntryStore, Pick};
use quotebook::sync::{SyncOrchestrator, SyncOutcome};
use quotebook::workspace::Workspace;

use crate::{Cli, Commands, RemoteCommands};

pub(crate) async fn handle_command(cli: Cli) -> Result<()> {
    let Cli {
        dir,
        remote_url,
        command,
    } = cli;
    let workspace = || open_workspace(dir.as_deref());

    match command {
        Commands::Init { force } => {
            let parent = match dir.clone() {
                Some(d) => d,
                None => std::env::current_dir().context("get current dir")?,
            };
            let ws = Workspace::init(&parent, force)?;
            let store = ws.open_store()?;
            println!(
                "Initialized quote collection at {} ({} quotes)",
                ws.root().display(),
                store.len()
            );
        }

        Commands::Add { text, category } => {
            let mut store = workspace()?.open_store()?;
            let entry = store.add(&text, &category)?;
            println!("Added quote to {}", entry.category);
        }

        Commands::Random => {
            let store = workspace()?.open_store()?;
            match store.pick_random() {
                Pick::Quote(entry) => print_quote(&entry.text, &entry.category),
                Pick::Empty => println!("No quotes found in the {} category.", store.filter()),
            }
        }

        Commands::Last => {
            let store = workspace()?.open_store()?;
            match store.last_viewed()? {
                Some(entry) => {
                    print_quote(&entry.text, &entry.category);
                    println!("(last viewed quote)");
                }
                None => println!("No quote viewed yet."),
            }
        }

        Commands::List { json } => {
            let store = workspace()?.open_store()?;
            let entries: Vec<_> = store.filtered().collect();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&entries).context("serialize quotes json")?
                );
            } else {
                for entry in entries {
                    println!("[{}] {}", entry.category, entry.text);
                }
            }
        }

        Commands::Categories { sorted } => {
            let store = workspace()?.open_store()?;
            let categories = if sorted {
                let mut menu = vec![ALL_CATEGORIES.to_string()];
                menu.extend(store.sorted_categories());
                menu
            } else {
                store.category_menu()
            };
            for category in categories {
                let marker = if store.filter().as_str() == category {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, category);
            }
        }

        Commands::Filter { category } => {
            let mut store = workspace()?.open_store()?;
            store.set_filter(&category)?;
            println!("Filter set to {}", store.filter());
        }

        Commands::ClearFilter => {
            let mut store = workspace()?.open_store()?;
            store.clear_filter()?;
            println!("Filter cleared");
        }

        Commands::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let mut store = workspace()?.open_store()?;
            let report = store.import_json_str(&raw)?;
            for (idx, reason) in &report.rejected {
                eprintln!("skipped element {}: {}", idx, reason);
            }
            println!("Imported {} quote(s)", report.imported);
        }

        Commands::Export { out } => {
            let store = workspace()?.open_store()?;
            if store.is_empty() {
                anyhow::bail!("no quotes to export");
            }
            let json = store.export_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json.as_bytes())
                        .with_context(|| format!("write {}", path.display()))?;
                    println!("Exported {} quote(s) to {}", store.len(), path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Remote { command } => {
            let ws = workspace()?;
            let mut cfg = ws.read_config()?;
            match command {
                RemoteCommands::Show { json } => {
                    if json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&cfg.remote)
                                .context("serialize remote json")?
                        );
                    } else if let Some(remote) = cfg.remote {
                        println!("url: {}", remote.base_url);
                        println!("sync interval: {}s", cfg.sync_interval_secs);
                    } else {
                        println!("No remote configured");
                    }
                }
                RemoteCommands::Set { url } => {
                    let url = url.trim().to_string();
                    if !(url.starts_with("http://") || url.starts_with("https://")) {
                        anyhow::bail!("remote url must start with http:// or https://");
                    }
                    cfg.remote = Some(RemoteConfig { base_url: url });
                    ws.write_config(&cfg)?;
                    println!("Remote configured");
                }
                RemoteCommands::Clear => {
                    cfg.remote = None;
                    ws.write_config(&cfg)?;
                    println!("Remote cleared");
                }
            }
        }

        Commands::Status { json } => {
            let ws = workspace()?;
            let cfg = ws.read_config()?;
            let store = ws.open_store()?;
            let status = store.status();
            let remote = remote_url
                .clone()
                .or_else(|| cfg.remote.map(|r| r.base_url));
            if json {
                let v = serde_json::json!({
                    "store": status,
                    "remote": remote,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&v).context("serialize status json")?
                );
            } else {
                println!("quotes: {}", status.entries);
                println!("filter: {}", status.filter);
                println!("pending changes: {}", status.pending_changes);
                println!(
                    "last sync: {}",
                    status.last_sync_time.as_deref().unwrap_or("never")
                );
                println!("remote: {}", remote.as_deref().unwrap_or("(none)"));
            }
        }

        Commands::Sync => {
            let ws = workspace()?;
            let orchestrator = build_orchestrator(&ws, remote_url.as_deref())?;
            let outcome = orchestrator.sync_once().await;
            println!("{}", outcome.status_line());
            match outcome {
                SyncOutcome::Completed(report) => {
                    for c in &report.conflicts {
                        println!(
                            "  conflict: {:?} local={} server={}",
                            c.text, c.local_category, c.server_category
                        );
                    }
                }
                SyncOutcome::Failed { error, .. } => return Err(error.into()),
                SyncOutcome::Skipped => {}
            }
        }

        Commands::Watch { interval } => {
            let ws = workspace()?;
            let cfg = ws.read_config()?;
            let every = Duration::from_secs(interval.unwrap_or(cfg.sync_interval_secs).max(1));
            let orchestrator = Arc::new(build_orchestrator(&ws, remote_url.as_deref())?);

            println!("Syncing every {}s (Ctrl-C to stop)", every.as_secs());
            let periodic = PeriodicSync::spawn(orchestrator, every);
            tokio::signal::ctrl_c()
                .await
                .context("wait for ctrl-c")?;
            let attempts = periodic.shutdown().await;
            println!("Stopped after {} sync attempt(s)", attempts);
        }
    }

    Ok(())
}

fn open_workspace(dir: Option<&Path>) -> Result<Workspace> {
    match dir {
        Some(dir) => Workspace::open(dir),
        None => Workspace::discover(&std::env::current_dir().context("get current dir")?),
    }
}

fn require_remote(ws: &Workspace, override_url: Option<&str>) -> Result<RemoteConfig> {
    if let Some(url) = override_url {
        return Ok(RemoteConfig {
            base_url: url.to_string(),
        });
    }
    let cfg = ws.read_config()?;
    cfg.remote
        .context("no remote configured (run `quotebook remote set --url ...`)")
}

fn build_orchestrator(ws: &Workspace, override_url: Option<&str>) -> Result<SyncOrchestrator> {
    let remote = require_remote(ws, override_url)?;
    let gateway = HttpRemote::new(&remote)?;
    let store: EntryStore = ws.open_store()?;
    Ok(SyncOrchestrator::new(
        Arc::new(Mutex::new(store)),
        Arc::new(gateway),
    ))
}

fn print_quote(text: &str, category: &str) {
    println!("\"{}\"", text);
    println!("  - {}", category);
}
