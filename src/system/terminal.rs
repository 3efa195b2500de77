// src/system/terminal.rs

use dialoguer::console::Term;

/// Columns of the terminal attached to stdout, or `fallback` when stdout is not a terminal.
pub fn terminal_width(fallback: usize) -> usize {
    match Term::stdout().size_checked() {
        Some((_rows, columns)) if columns > 0 => usize::from(columns),
        _ => {
            log::trace!("Terminal size unavailable, using {} columns.", fallback);
            fallback
        }
    }
}
