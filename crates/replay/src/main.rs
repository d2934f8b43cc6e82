use std::io::Read as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use gridcraft_core::{Editor, EditorConfig, EditorEvent, Layout};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A recorded editing session: an optional starting tree and settings, then
/// the interaction events in the order they happened.
#[derive(Debug, Default, Deserialize)]
struct Script {
    #[serde(default)]
    layout: Option<Layout>,
    #[serde(default)]
    config: Option<EditorConfig>,
    #[serde(default)]
    events: Vec<EditorEvent>,
}

fn main() -> Result<()> {
    init_logging();

    let script = match std::env::args_os().nth(1) {
        Some(arg) if arg.to_str() == Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read script from stdin")?;
            parse_script(&text).context("invalid script on stdin")?
        }
        Some(arg) => {
            let path = PathBuf::from(arg);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_script(&text).with_context(|| format!("invalid script {}", path.display()))?
        }
        None => Script::default(),
    };

    let mut editor = Editor::new(
        script.layout.unwrap_or_else(Layout::seed),
        script.config.unwrap_or_default(),
    );
    for (step, event) in script.events.into_iter().enumerate() {
        let summary = format!("{event:?}");
        let changed = editor.handle(event);
        tracing::info!(step, changed, event = %summary, "event applied");
    }

    println!("{}", editor.export().to_json_pretty()?);
    Ok(())
}

fn parse_script(text: &str) -> Result<Script> {
    Ok(serde_json::from_str(text)?)
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridcraft=info"));
    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );
    if subscriber.try_init().is_err() {
        eprintln!("gridcraft-replay: logging already initialized");
    }
}
