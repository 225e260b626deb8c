use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use product_dom::DomNode;
use product_page_core::{fixture, load_page, DomView, PageConfig, PageController};
use product_render_html::{render_page, PageOptions};
use std::{fs, path::Path};
use tracing_subscriber::EnvFilter;

mod script;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "product-replay", about = "Replay timed page events and print the resulting page")]
struct Args {
    /// Event script (JSON lines: {"at": ms, "event": {...}})
    script: String,
    /// Page tree JSON (a snapshot or a bare node); defaults to the reference page
    #[arg(long)]
    page: Option<String>,
    /// PageConfig JSON file
    #[arg(long)]
    config: Option<String>,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Advance the clock to this time after the last event
    #[arg(long)]
    until: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let page = match &args.page {
        Some(path) => read_page(Path::new(path))?,
        None => fixture::product_page(),
    };
    let config = match &args.config {
        Some(path) => {
            let data = fs::read_to_string(path).with_context(|| format!("read failed: {}", path))?;
            PageConfig::from_json(&data).with_context(|| format!("config parse failed: {}", path))?
        }
        None => PageConfig::default(),
    };
    let text = fs::read_to_string(&args.script).with_context(|| format!("read failed: {}", args.script))?;
    let steps = script::parse_script(&text).with_context(|| format!("script: {}", args.script))?;

    let mut controller = load_page(page, config)?;
    replay(&mut controller, steps, args.until);

    let out = match args.format {
        Format::Json => controller.view().snapshot_json()?,
        Format::Html => render_page(controller.view().page(), &PageOptions::default()),
    };
    println!("{}", out);
    Ok(())
}

fn read_page(path: &Path) -> Result<DomNode> {
    let data = fs::read_to_string(path).with_context(|| format!("read failed: {}", path.display()))?;
    if let Ok(snapshot) = product_dom::parse_snapshot(&data) {
        return Ok(snapshot.root);
    }
    product_dom::parse_node(&data).map_err(|e| anyhow!("page parse failed: {}: {}", path.display(), e))
}

fn replay(controller: &mut PageController<DomView>, steps: Vec<script::Step>, until: Option<u64>) {
    let count = steps.len();
    for step in steps {
        controller.dispatch_at(step.at, step.event);
    }
    if let Some(end) = until {
        controller.advance_to(end);
    }
    tracing::info!(events = count, now = controller.now(), pending = controller.pending_timers(), "replay finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_runs_timers_through_until() {
        let text = "{\"at\": 0, \"event\": {\"action\": \"quick_add\"}}\n{\"at\": 100, \"event\": {\"action\": \"open_cart\"}}";
        let steps = script::parse_script(text).unwrap();
        let mut c = load_page(fixture::product_page(), PageConfig::default()).unwrap();
        replay(&mut c, steps, Some(5000));
        assert_eq!(c.now(), 5000);
        assert_eq!(c.pending_timers(), 0);
        assert!(c.overlays().scroll_locked());
        assert!(!c.toast().is_visible());
    }

    #[test]
    fn test_args_default_to_json() {
        let args = Args::try_parse_from(["product-replay", "s.jsonl", "--until", "10"]).unwrap();
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.until, Some(10));
        let args = Args::try_parse_from(["product-replay", "s.jsonl", "--format", "html"]).unwrap();
        assert_eq!(args.format, Format::Html);
    }
}
