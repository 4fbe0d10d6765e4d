use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_FILE: &str = "logs/route_engine.log";

/// Where and how verbosely the binary logs.
#[derive(Debug, Clone, PartialEq)]
pub struct LogOptions {
    /// Explicit level, e.g. from `--log-level`. Takes precedence over `RUST_LOG`.
    pub level: Option<String>,

    /// Log file, `None` logs to stderr only.
    pub file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self { level: None, file: Some(PathBuf::from(DEFAULT_LOG_FILE)) }
    }
}

/// Picks the level from the explicit option, then `RUST_LOG`, then `info`. Unparsable values
/// fall through to the next source.
pub fn resolve_level(explicit: Option<&str>, env: Option<&str>) -> LevelFilter {
    [explicit, env].into_iter().flatten().find_map(|value| value.trim().parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Call once from the binary; the library only uses `log` macros.
///
/// File lines carry the thread name so a parallel bulk run can be followed per worker. A log
/// file that cannot be opened is reported on stderr and logging continues on the console.
pub fn init(options: &LogOptions) {
    let env_level = std::env::var("RUST_LOG").ok();
    let level = resolve_level(options.level.as_deref(), env_level.as_deref());

    let colors = ColoredLevelConfig::new().error(Color::Red).warn(Color::Yellow).info(Color::Green).debug(Color::Blue).trace(Color::BrightBlack);

    let console = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!("[{} {} {}] {}", Local::now().format("%H:%M:%S"), colors.color(record.level()), record.target(), message))
        })
        .chain(std::io::stderr());

    let mut dispatch = Dispatch::new().level(level).level_for("rayon_core", LevelFilter::Warn).chain(console);

    if let Some(path) = &options.file {
        match open_log_file(path) {
            Ok(file) => {
                let file_config = Dispatch::new()
                    .format(|out, message, record| {
                        let thread = std::thread::current();
                        out.finish(format_args!(
                            "[{} {} {} {}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            thread.name().unwrap_or("worker"),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file);
                dispatch = dispatch.chain(file_config);
            }
            Err(e) => eprintln!("Failed to open log file '{}': {}", path.display(), e),
        }
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
        return;
    }

    match &options.file {
        Some(path) => log::debug!("Logger initialized at {}, writing to '{}'", level, path.display()),
        None => log::debug!("Logger initialized at {}, console only", level),
    }
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fern::log_file(path)
}
