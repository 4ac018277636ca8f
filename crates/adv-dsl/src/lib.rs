pub mod diagnostics;
pub mod error;
pub mod parser;

use std::path::Path;

use adv_core::Limits;

pub use diagnostics::{Diagnostic, Severity, render_diagnostics};
pub use error::{LoadError, LoadResult};
pub use parser::{DEFAULT_WORLD_NAME, LoadedWorld, parse_condition};

/// Parse world file source with the default limits.
pub fn parse_world(source: &str) -> LoadResult<LoadedWorld> {
    parser::parse(source, Limits::default())
}

/// Parse world file source with custom capacity limits.
pub fn parse_world_with_limits(source: &str, limits: Limits) -> LoadResult<LoadedWorld> {
    parser::parse(source, limits)
}

/// Read and parse a world file.
pub fn load_world(path: &Path) -> LoadResult<LoadedWorld> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| LoadError::general(format!("Cannot open file {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "loading world file");
    parse_world(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_world_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tiny.world");
        std::fs::write(&path, "[WORLD]\nname: Tiny\n[ROOM:only]\nname: Only\ndescription: Alone.\n")
            .unwrap();

        let loaded = load_world(&path).unwrap();
        assert_eq!(loaded.name, "Tiny");
        assert!(loaded.world.find_room("only").is_some());
    }

    #[test]
    fn missing_file_is_a_general_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_world(&dir.path().join("absent.world")).unwrap_err();
        assert_eq!(err.line, 0);
        assert!(err.message.starts_with("Cannot open file"), "{}", err.message);
    }

    #[test]
    fn error_renders_with_ariadne() {
        let source = "[ROOM:a]\nname A\n";
        let err = parse_world(source).unwrap_err();
        let output = render_diagnostics(source, "bad.world", &[err.to_diagnostic()]);
        assert!(output.contains("Invalid property line"));
    }
}
