use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use clearcode::cli::{CliArgs, RunConfig};
use clearcode::config::EditorConfig;
use clearcode::messages::{DocumentMsg, EditorMsg, Msg};
use clearcode::model::{AppModel, DocumentId};
use clearcode::output::Highlighted;
use clearcode::runtime::{FileWatcher, Runtime};
use clearcode::scheduler::TaskKey;
use clearcode::theme::{load_theme, Theme};

/// How often watch mode drains file events
const WATCH_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    clearcode::tracing::init();

    let run = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    // The command line never writes the workspace
    let mut config = EditorConfig::load();
    config.auto_save = false;
    config.syntax_enabled = run.syntax_enabled;

    let theme = load_theme(&run.theme).unwrap_or_else(|e| {
        tracing::warn!("{}; using the default theme", e);
        Theme::default()
    });

    let mut runtime = Runtime::new(AppModel::empty(config), None);
    let now = Instant::now();
    let mut stdout = io::stdout().lock();

    if run.file_paths().is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        open(&mut runtime, &run, "stdin".to_string(), text, now);
        print_active(&mut stdout, &runtime, &run, &theme)?;
        return Ok(());
    }

    let mut documents = HashMap::new();
    for path in run.file_paths() {
        let text = read_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let id = open(&mut runtime, &run, name, text, now);
        documents.insert(path.clone(), id);
        print_active(&mut stdout, &runtime, &run, &theme)?;
    }

    if run.watch {
        drop(stdout);
        watch(&mut runtime, &run, &theme, &documents)?;
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn open(
    runtime: &mut Runtime,
    run: &RunConfig,
    name: String,
    content: String,
    now: Instant,
) -> DocumentId {
    runtime.dispatch(Msg::Document(DocumentMsg::Open { name, content }), now);
    if let Some(language) = run.language {
        runtime.dispatch(Msg::Document(DocumentMsg::SetLanguage(language)), now);
    }
    runtime.model.documents.active_id().unwrap_or(DocumentId(0))
}

fn print_active(
    out: &mut impl Write,
    runtime: &Runtime,
    run: &RunConfig,
    theme: &Theme,
) -> Result<()> {
    let Some(doc) = Highlighted::from_model(&runtime.model) else {
        return Ok(());
    };
    let rendered = doc.render(run.format, theme).map_err(|e| anyhow!(e))?;
    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}

/// Re-highlight files as they change. Edits go through the same debounced
/// path an interactive session uses.
fn watch(
    runtime: &mut Runtime,
    run: &RunConfig,
    theme: &Theme,
    documents: &HashMap<PathBuf, DocumentId>,
) -> Result<()> {
    let watcher = FileWatcher::new(run.file_paths())?;

    // Watcher paths are canonical, the CLI ones may not be
    let mut by_watched = HashMap::new();
    for (path, id) in documents {
        if let Ok(canonical) = path.canonicalize() {
            by_watched.insert(canonical, *id);
        }
    }
    eprintln!("Watching {} file(s), press Ctrl+C to stop", watcher.files().len());

    loop {
        for path in watcher.poll_changes() {
            let Some(&id) = by_watched.get(&path) else {
                continue;
            };
            let text = match read_file(&path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("{:#}", e);
                    continue;
                }
            };
            let now = Instant::now();
            runtime.dispatch(Msg::Document(DocumentMsg::SwitchTo(id)), now);
            runtime.dispatch(Msg::Editor(EditorMsg::TextChanged(text)), now);
            runtime.run_until_settled(TaskKey::Highlight);
            print_active(&mut io::stdout().lock(), runtime, run, theme)?;
        }
        runtime.advance(Instant::now());
        thread::sleep(WATCH_POLL);
    }
}
