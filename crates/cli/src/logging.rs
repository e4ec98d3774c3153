use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`), so stdout stays
/// clean JSON.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .or_raise(|| ErrorKind::Logging)?;
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        exn::bail!(ErrorKind::Logging);
    }
    Ok(())
}
