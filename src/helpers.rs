use std::{fs::File, io, path::Path};

use env_logger::{Env, Target};

/// Sends log output to `path` (truncated) so it stays off the terminal menu.
/// `RUST_LOG` still picks the level, `info` by default.
pub fn init_file_logger(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
