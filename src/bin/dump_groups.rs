use anyhow::{Context, Result};
use std::{env, fs};
use surveycoder::group::BUILTIN_GROUPS;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Print the built-in group set as YAML, or write it to the path given as
/// the first argument. The output is a valid `--groups` file.
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let yaml = BUILTIN_GROUPS.to_yaml()?;
    match env::args().nth(1) {
        Some(path) => {
            fs::write(&path, &yaml).with_context(|| format!("writing {}", path))?;
            info!(path = %path, groups = BUILTIN_GROUPS.groups.len(), "wrote built-in groups");
        }
        None => print!("{}", yaml),
    }
    Ok(())
}
