pub mod check;
pub mod delete_save;
pub mod play;
pub mod saves;
pub mod show;

use std::path::Path;

use adv_dsl::{Diagnostic, LoadedWorld, render_diagnostics};

/// Load a world file and print its diagnostics.
/// Returns the loaded world unless loading failed.
fn load_world(path: &Path) -> Result<LoadedWorld, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    let filename = path.display().to_string();

    match adv_dsl::parse_world(&source) {
        Ok(loaded) => {
            print_diagnostics(&source, &filename, &loaded.warnings);
            tracing::debug!(
                path = %filename,
                rooms = loaded.world.room_count(),
                items = loaded.world.item_count(),
                warnings = loaded.warnings.len(),
                "world loaded"
            );
            Ok(loaded)
        }
        Err(e) if e.line == 0 => Err(format!("{filename}: {}", e.message)),
        Err(e) => {
            print_diagnostics(&source, &filename, &[e.to_diagnostic()]);
            Err(format!("failed to load {filename}"))
        }
    }
}

/// Print diagnostics to stderr using ariadne.
fn print_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    eprint!("{}", render_diagnostics(source, filename, diagnostics));
}

/// "1 warning", "3 warnings".
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
