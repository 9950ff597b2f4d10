use tabnote_core::{
    apply_decision, classify, create_note, delete_active_note, derive_title, EditDecision,
    EditorError, EditorSessionState, InMemorySessionRepository, NoteEditor, Selection,
    TITLE_MAX_CHARS,
};

fn editor_with(text: &str) -> NoteEditor<InMemorySessionRepository> {
    let mut editor = NoteEditor::open(InMemorySessionRepository::new());
    editor.text_changed(0, text).unwrap();
    editor
}

#[test]
fn scenario_newline_after_bullet_item_adds_bullet() {
    let mut editor = editor_with("• item1");
    editor.selection_changed(Selection::caret(8));

    let outcome = editor.text_changed(0, "• item1\n").unwrap();
    assert_eq!(outcome.text, "• item1\n• ");
    assert_eq!(outcome.caret, None);
    assert!(outcome.capitalize);
}

#[test]
fn scenario_newline_on_empty_bullet_terminates_list() {
    let mut editor = editor_with("• item1\n• ");
    editor.selection_changed(Selection::caret(11));

    let outcome = editor.text_changed(0, "• item1\n• \n").unwrap();
    assert_eq!(outcome.text, "• item1\n");
    assert!(!outcome.text.ends_with("• "));
    assert!(!outcome.capitalize);
}

#[test]
fn scenario_dash_at_line_start_becomes_bullet() {
    let mut editor = editor_with("hello\n");
    editor.selection_changed(Selection::caret(7));

    let outcome = editor.text_changed(0, "hello\n-").unwrap();
    assert_eq!(outcome.text, "hello\n• ");
    assert_eq!(editor.state().note_text(0), Some("hello\n• "));
}

#[test]
fn scenario_manual_bullet_mid_text_restores_caret() {
    let mut editor = editor_with("hello world");
    editor.selection_changed(Selection::caret(5));

    let outcome = editor.insert_bullet().unwrap();
    assert_eq!(outcome.text, "hello\n•  world");
    assert_eq!(outcome.caret, Some(8));
    assert!(editor.state().pending_capitalize);
}

#[test]
fn manual_bullet_without_selection_appends_at_end() {
    let mut editor = editor_with("list");
    let outcome = editor.insert_bullet().unwrap();
    assert_eq!(outcome.text, "list\n• ");
    assert_eq!(outcome.caret, None);
}

#[test]
fn capitalize_flag_clears_after_first_word() {
    let mut editor = editor_with("");
    editor.insert_bullet().unwrap();
    assert!(editor.state().pending_capitalize);

    editor.text_changed(0, "• M").unwrap();
    editor.text_changed(0, "• Milk").unwrap();
    assert!(editor.state().pending_capitalize);

    let outcome = editor.text_changed(0, "• Milk ").unwrap();
    assert!(!editor.state().pending_capitalize);
    assert!(!outcome.capitalize);
}

#[test]
fn continued_list_round_trip() {
    let mut editor = editor_with("");
    for (text, caret) in [("-", 1), ("• a", 3), ("• a\n", 4), ("• a\n• b", 7), ("• a\n• b\n", 8)] {
        editor.selection_changed(Selection::caret(caret));
        editor.text_changed(0, text).unwrap();
    }
    assert_eq!(editor.state().note_text(0), Some("• a\n• b\n• "));

    editor.selection_changed(Selection::caret(11));
    editor.text_changed(0, "• a\n• b\n• \n").unwrap();
    assert_eq!(editor.state().note_text(0), Some("• a\n• b\n"));
}

#[test]
fn no_selection_recorded_commits_newline_verbatim() {
    let mut editor = editor_with("• item1");
    let outcome = editor.text_changed(0, "• item1\n").unwrap();
    assert_eq!(outcome.text, "• item1\n");
}

#[test]
fn deletions_never_rewrite_text() {
    let cases = [
        ("• item1\n• ", "• item1\n•"),
        ("hello\n-x", "hello\n-"),
        ("• a\n\n", "• a\n"),
        ("", ""),
    ];
    for (previous, new) in cases {
        let selection = Some(Selection::caret(new.chars().count()));
        assert_eq!(
            classify(previous, new, selection),
            EditDecision::PlainEdit(new.to_string())
        );
    }
}

#[test]
fn continue_bullet_adds_exactly_one_bullet_line() {
    for text in ["• a", "plain", "• a\n• b", "x\n"] {
        let typed = format!("{text}\n");
        let result = apply_decision(EditDecision::ContinueBullet, &typed);
        assert_eq!(result.matches('•').count(), text.matches('•').count() + 1);
        assert!(result.ends_with("\n• "));
        assert!(result.starts_with(text));
    }
}

#[test]
fn title_properties() {
    assert_eq!(derive_title(""), "New note");
    assert_eq!(derive_title("A\nB"), "A");
    for text in ["short", "exactly fifteen", "a much longer first line here", "••••••••••••••••••"] {
        assert!(derive_title(text).chars().count() <= TITLE_MAX_CHARS);
    }
}

#[test]
fn create_then_delete_keeps_remaining_note() {
    let mut state = EditorSessionState::default();
    state.notes.insert(0, "keep me".to_string());
    state.routes[0].title = derive_title("keep me");

    let two_notes = create_note(&state);
    let back = delete_active_note(&two_notes);
    assert_eq!(back.routes.len(), 1);
    assert_eq!(back.routes[0].key, 0);
    assert_eq!(back.note_text(0), Some("keep me"));
}

#[test]
fn deleting_last_note_yields_default_session() {
    let mut editor = editor_with("last words");
    editor.delete_active_note();
    let state = editor.state();
    assert_eq!(state.routes.len(), 1);
    assert_eq!(state.routes[0].key, 0);
    assert_eq!(state.note_text(0), Some(""));
}

#[test]
fn tab_switch_resets_selection_and_routes_edits() {
    let mut editor = editor_with("first");
    let second = editor.new_note();
    assert_eq!(editor.state().index, 0);
    assert_eq!(editor.state().routes[0].title, "New note");

    editor.selection_changed(Selection::caret(0));
    editor.set_active_index(1).unwrap();
    assert_eq!(editor.current_selection(), None);
    assert_eq!(editor.share_text(), Some("first"));

    editor.text_changed(second, "Second note title").unwrap();
    assert_eq!(editor.state().routes[0].title, "Second note tit");

    let err = editor.set_active_index(5).unwrap_err();
    assert_eq!(err, EditorError::IndexOutOfBounds { index: 5, len: 2 });
}

#[test]
fn delete_flow_uses_confirmation_prompt() {
    let mut editor = editor_with("Groceries\n• eggs");
    editor.new_note();
    editor.set_active_index(1).unwrap();

    let prompt = editor.request_delete();
    assert_eq!(prompt, "Delete \"Groceries\"?");
    assert!(editor.state().delete_dialog);

    editor.cancel_delete();
    assert!(!editor.state().delete_dialog);

    editor.request_delete();
    editor.delete_active_note();
    assert_eq!(editor.state().routes.len(), 1);
    assert!(!editor.state().notes.contains_key(&0));
    assert!(!editor.state().delete_dialog);
}

#[test]
fn typo_fix_before_trailing_newline_is_not_rewritten() {
    let mut editor = editor_with("• item1\n");
    editor.selection_changed(Selection::caret(8));

    let outcome = editor.text_changed(0, "• item1s\n").unwrap();
    assert_eq!(outcome.text, "• item1s\n");
    assert_eq!(editor.state().note_text(0), Some("• item1s\n"));
}

#[test]
fn enter_before_existing_dash_keeps_the_dash() {
    let mut editor = editor_with("x-");
    editor.selection_changed(Selection::caret(2));

    let outcome = editor.text_changed(0, "x\n-").unwrap();
    assert_eq!(outcome.text, "x\n-");
}

#[test]
fn dash_typed_right_after_terminating_list_starts_new_bullet() {
    let mut editor = editor_with("• item1\n• ");
    editor.selection_changed(Selection::caret(11));
    let terminated = editor.text_changed(0, "• item1\n• \n").unwrap();
    assert_eq!(terminated.text, "• item1\n");
    assert_eq!(editor.current_selection(), Some(Selection::caret(8)));

    editor.selection_changed(Selection::caret(9));
    let converted = editor.text_changed(0, "• item1\n-").unwrap();
    assert_eq!(converted.text, "• item1\n• ");
    assert!(converted.capitalize);
}
