// Logging
// env_logger behind the log facade; RUST_LOG wins over the configured level

use std::fs::File;

use env_logger::{Builder, Env, Target};

use crate::config::LogConfig;
use crate::error::{Error, Result};

pub fn init(config: &LogConfig) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.level.as_str()));

    if let Some(path) = &config.file {
        let file = File::create(path).map_err(|source| Error::LogFile {
            path: path.clone(),
            source,
        })?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
