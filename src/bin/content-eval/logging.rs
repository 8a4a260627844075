use std::path::Path;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

const ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const ROTATE_KEEP: usize = 5;

/// Logs to stderr and a rotating file in `logs_dir`. `RUST_LOG` takes
/// precedence over the level picked from `verbose`.
pub fn init_logging(verbose: bool, logs_dir: &Path) -> anyhow::Result<LoggerHandle> {
    let level = if verbose { "debug" } else { "info" };
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(logs_dir)
                .basename("content-eval"),
        )
        .duplicate_to_stderr(Duplicate::All)
        .rotate(
            Criterion::Size(ROTATE_SIZE),
            Naming::Numbers,
            Cleanup::KeepLogFiles(ROTATE_KEEP),
        )
        .start()?;
    Ok(handle)
}
