use env_logger::{Builder, Env};
use log::{Level, LevelFilter, Record};
use std::io::{self, Write};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub use log::{debug, error, info, trace, warn};

const DEFAULT_FILTER: &str = "scoreboard=info";

/// GUI crates that log every window and web view event at debug level.
const NOISY_MODULES: &[&str] = &["tao", "wry", "rfd"];

pub fn init_logger() {
    let mut builder =
        Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));

    for module in NOISY_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }

    builder.format(|_buf, record| {
        let writer = BufferWriter::stdout(ColorChoice::Auto);
        let mut buffer = writer.buffer();
        write_record(&mut buffer, record)?;
        writer.print(&buffer)
    });

    let _ = builder.try_init();
}

/// `[LEVEL][module] message`, with the crate prefix dropped from our own
/// module paths so coordinator lines stay short.
fn write_record(out: &mut impl WriteColor, record: &Record) -> io::Result<()> {
    let module_path = record.module_path().unwrap_or("<unknown>");
    let module_path = module_path
        .strip_prefix("scoreboard::")
        .unwrap_or(module_path);

    out.set_color(ColorSpec::new().set_fg(Some(level_color(record.level()))))?;
    write!(out, "[{}][{}]", record.level(), module_path)?;
    out.reset()?;
    writeln!(out, " {}", record.args())
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Trace => Color::Cyan,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}
