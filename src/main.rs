use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use env_logger::Env;

use mapview::config::{self, FileSave};
use mapview::core::{EnumDef, KeyType, TypeRegistry};
use mapview::driver::{self, App};
use mapview::input_event::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
use mapview::span::{Span, SpanLine};
use mapview::style::{Color, Style};
use mapview::widgets::value_view::TmpSaveRef;
use mapview::{MapView, MapViewOptions};

/// Type name that gets the demo's extra toolbar action.
const CLEARABLE_TYPE: &str = "style-map";
const STYLE_TAG: &str = "style-prop";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KeyArg {
    Text,
    Int,
}

impl From<KeyArg> for KeyType {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Text => KeyType::Text,
            KeyArg::Int => KeyType::Int,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mapview",
    version,
    about = "Edit a JSON or YAML object as a key/value grid"
)]
struct Cli {
    /// JSON or YAML file holding a single object
    file: PathBuf,

    /// View options (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Value type shared by all entries, or `any` for a type per entry
    #[arg(
        long,
        default_value = "any",
        value_parser = ["any", "bool", "int", "float", "string"]
    )]
    value_type: String,

    #[arg(long, value_enum, default_value = "text")]
    key_type: KeyArg,

    /// Collection type name; `style-map` adds a Clear action
    #[arg(long, value_name = "NAME")]
    type_name: Option<String>,

    /// Rewrite the file after every edit
    #[arg(long)]
    write_back: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn demo_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::with_basic_types();
    registry.register_enum(
        EnumDef::new("Align", ["left", "center", "right"]),
        [STYLE_TAG],
    );
    registry.register_toolbar(CLEARABLE_TYPE, |_map, bar| {
        bar.add_custom("Clear", "delete", |map| map.clear());
    });
    registry
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let registry = Rc::new(demo_registry());
    let options = match &cli.options {
        Some(path) => config::load_options(path)?,
        None => MapViewOptions::default(),
    };
    let value_kind = config::parse_value_kind(&cli.value_type, &registry)?;
    let mut collection =
        config::load_collection(&cli.file, cli.key_type.into(), value_kind, &registry)?;
    if let Some(name) = &cli.type_name {
        collection = collection.with_type_name(name.clone());
    }
    let collection = collection.into_ref();

    let tmp_save: Option<TmpSaveRef> = if cli.write_back {
        Some(Rc::new(FileSave::new(&cli.file, &collection)))
    } else {
        None
    };
    let mut view = MapView::new(cli.file.display().to_string(), registry).with_options(options);
    view.set_collection(&collection, tmp_save);

    driver::main(|app| event_loop(app, &mut view))?;

    if view.is_changed() && !cli.write_back {
        log::warn!("edits were not saved; pass --write-back to keep them");
    }
    Ok(())
}

fn event_loop(app: &mut dyn App, view: &mut MapView) -> io::Result<()> {
    let mut render_requested = true;
    loop {
        if render_requested {
            app.present(&screen(view, app.size()))?;
            render_requested = false;
        }
        match app.poll_event(Duration::from_millis(100))? {
            Some(TerminalEvent::Key(key)) if is_quit(key) => return Ok(()),
            Some(TerminalEvent::Key(key)) => {
                render_requested = view.on_key(key).request_render;
            }
            Some(TerminalEvent::Resize(_)) => render_requested = true,
            None => {}
        }
    }
}

fn is_quit(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

fn screen(view: &MapView, size: TerminalSize) -> Vec<SpanLine> {
    let mut lines = vec![
        vec![Span::styled(view.name(), Style::new().bold())],
        SpanLine::new(),
    ];
    lines.extend(view.draw());
    lines.push(SpanLine::new());
    let hint = view
        .focused_tooltip()
        .unwrap_or("Tab/Up/Down move  Enter commit  Esc revert  Ctrl-Q quit");
    lines.push(vec![Span::styled(hint, Style::new().color(Color::DarkGrey))]);
    lines.truncate(usize::from(size.height));
    lines
}
