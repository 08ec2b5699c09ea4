use colored::*;

static LOGGER: Logger = Logger;
struct Logger;

const BASE_MODULES: &[&str] = &["ipreport", "shared", "publicip"];

fn target_is_base(target: &str) -> bool {
    BASE_MODULES.iter().any(|module| {
        target == *module
            || target
                .strip_prefix(module)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
            && (log::max_level() == log::LevelFilter::Trace || target_is_base(metadata.target()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_str = match record.level() {
            log::Level::Error => "[E]".red(),
            log::Level::Warn => "[!]".yellow(),
            log::Level::Info => "[*]".dimmed(),
            log::Level::Debug => "[D]".blue(),
            log::Level::Trace => "[T]".purple(),
        };
        // stdout belongs to the report itself.
        if log::max_level() >= log::LevelFilter::Debug {
            eprintln!(
                "{} {} {}",
                level_str,
                format!("[{}]", record.target()).dimmed(),
                record.args()
            );
        } else {
            eprintln!("{} {}", level_str, record.args());
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
