use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Library crates, named `{binary}_{suffix}`, that log alongside the binary.
const LIBRARY_SUFFIXES: &[&str] = &["knn", "data", "surface"];

/// `-v` count to level: none is warn, then info, debug, and trace for 3+.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Comma-separated `target=level` directives for this binary and its libraries.
fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    let bin = env!("CARGO_CRATE_NAME");
    std::iter::once(bin.to_string())
        .chain(LIBRARY_SUFFIXES.iter().map(|s| format!("{bin}_{s}")))
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the stderr subscriber. `RUST_LOG`, when set, replaces the
/// verbosity-derived filter.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(1), LevelFilter::INFO);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(9), LevelFilter::TRACE);
    }

    #[test]
    fn test_directives_cover_every_crate() {
        let directives = default_directives(1).to_lowercase();
        for target in ["knnmap=", "knnmap_knn=", "knnmap_data=", "knnmap_surface="] {
            assert!(directives.contains(target), "{directives}");
        }
        assert!(directives.split(',').all(|d| d.ends_with("=info")));
        assert!(EnvFilter::try_new(default_directives(3)).is_ok());
    }
}
