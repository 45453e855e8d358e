//! Logging setup using env_logger
//!
//! `RUST_LOG` wins over the configured default level. Logs go to stderr so
//! stdout only carries state output.

use env_logger::{Builder, Env, Target};

pub fn init(default_level: &str) {
    let env = Env::default().default_filter_or(default_level);
    let result = Builder::from_env(env)
        .format_timestamp_millis()
        .target(Target::Stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {}", e);
    }
}
