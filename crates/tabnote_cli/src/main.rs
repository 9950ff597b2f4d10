//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tabnote_core` linkage with deterministic output.
//! - Replay each argument as the next full text of note 0, with the caret
//!   at end-of-text, and print what the editor commits.
//!
//! Example: `tabnote_cli "• milk" "• milk\n"` prints `• milk\n• `.

use tabnote_core::{InMemorySessionRepository, NoteEditor, Selection};

fn main() {
    println!("tabnote_core ping={}", tabnote_core::ping());
    println!("tabnote_core version={}", tabnote_core::core_version());

    let mut editor = NoteEditor::open(InMemorySessionRepository::new());
    for raw in std::env::args().skip(1) {
        let typed = raw.replace("\\n", "\n");
        editor.selection_changed(Selection::caret(typed.chars().count()));
        match editor.text_changed(0, &typed) {
            Ok(outcome) => println!("text={:?} capitalize={}", outcome.text, outcome.capitalize),
            Err(err) => {
                eprintln!("replay failed: {err}");
                std::process::exit(1);
            }
        }
    }

    for route in &editor.state().routes {
        println!("tab key={} title={:?}", route.key, route.title);
    }
}
