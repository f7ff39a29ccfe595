use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::io::Write;

/// Logs to stdout; `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Stdout)
        .filter(None, default_level)
        .parse_env(Env::default())
        .init();

    log::debug!("Logger initialized at {}.", default_level);
}
