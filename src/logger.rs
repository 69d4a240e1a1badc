use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::exe_dir;

/// Installs the global subscriber. Output goes to log.txt beside the
/// executable, or stderr if that file can't be opened.
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false).with_target(false);

    let path = exe_dir().join("log.txt");
    let result = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(mut f) => {
            let _ = writeln!(f, "===== autotrans start =====");
            builder.with_writer(Mutex::new(f)).try_init()
        }
        Err(_) => builder.with_writer(std::io::stderr).try_init(),
    };
    if let Err(e) = result {
        eprintln!("logger already initialised: {}", e);
    }
}
