// Keysim Scenario Tests
//
// Full press/rebind/undo workflows driven through the public API, with a
// recording sink standing in for the console.

use keysim_core::{
    CommandBinding, HistoryEntry, Key, Keyboard, PressOutcome, RecordingSink, StateKind,
};

// =========================================================================
// Test Helpers
// =========================================================================

fn keyboard() -> Keyboard<RecordingSink> {
    Keyboard::with_sink(RecordingSink::new())
}

/// Press a sequence of keys in order
fn press_all(kb: &mut Keyboard<RecordingSink>, keys: &[&str]) {
    for key in keys {
        kb.press(*key);
    }
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_reference_scenario() {
    let mut kb = keyboard();

    kb.press("q");
    kb.press("shift");
    kb.press("q");
    kb.press("alt");
    kb.press("q");
    kb.rebind_alt(
        "q",
        CommandBinding::from_text("Open Browser", "Close Browser"),
    );
    kb.press("q");
    kb.undo();

    assert_eq!(
        kb.sink().rendered(),
        vec![
            "q | press(q)",
            "Q | press(q)",
            "Open Browser | press(alt+q)",
            "Close Browser | press(alt+q)",
        ]
    );

    // The undo consumed the last Alt press; the silent one remains
    let states: Vec<StateKind> = kb.history().iter().map(|e| e.state).collect();
    assert_eq!(
        states,
        vec![StateKind::Default, StateKind::Shift, StateKind::Alt]
    );
}

#[test]
fn test_default_presses_record_one_entry_each() {
    let mut kb = keyboard();
    for (i, name) in ["q", "w", "space", "1", ""].iter().enumerate() {
        assert_eq!(kb.press(*name), PressOutcome::Dispatched(StateKind::Default));
        assert_eq!(kb.history().len(), i + 1);
        assert_eq!(
            kb.history().last(),
            Some(&HistoryEntry::new(Key::new(*name), StateKind::Default))
        );
        assert_eq!(
            kb.sink().last().unwrap().to_string(),
            format!("{0} | press({0})", name)
        );
    }
}

#[test]
fn test_modifier_presses_never_reach_history() {
    let mut kb = keyboard();
    press_all(&mut kb, &["shift", "alt", "shift", "alt", "alt"]);

    assert!(kb.history().is_empty());
    assert!(kb.sink().is_empty());
    assert_eq!(kb.current_state(), StateKind::Alt);
}

#[test]
fn test_undo_walks_back_through_mixed_states() {
    let mut kb = keyboard();
    kb.rebind_alt("w", CommandBinding::from_text("Open Console", "Close Console"));
    kb.rebind_alt("e", CommandBinding::from_text("Open Editor", "Close Editor"));

    press_all(&mut kb, &["q", "alt", "w", "shift", "r", "alt", "e"]);
    kb.sink_mut().take();

    while kb.undo().is_some() {}

    assert_eq!(
        kb.sink().rendered(),
        vec!["Close Editor | press(alt+e)", "Close Console | press(alt+w)"]
    );
    assert!(kb.history().is_empty());

    // Further undos stay silent
    assert!(kb.undo().is_none());
    assert_eq!(kb.sink().len(), 2);
}

#[test]
fn test_undo_with_empty_history_changes_nothing() {
    let mut kb = keyboard();
    kb.press("alt");
    kb.rebind_alt("q", CommandBinding::from_text("X", "Y"));

    assert!(kb.undo().is_none());
    assert!(kb.sink().is_empty());
    assert_eq!(kb.current_state(), StateKind::Alt);
    assert!(kb.state(StateKind::Alt).binding("q").is_some());
}

#[test]
fn test_rebind_twice_only_latest_observable() {
    let mut kb = keyboard();
    kb.rebind_alt("q", CommandBinding::from_text("Open Browser", "Close Browser"));
    kb.rebind_alt("q", CommandBinding::from_text("Open Notepad", "Close Notepad"));

    press_all(&mut kb, &["alt", "q"]);
    kb.undo();

    let rendered = kb.sink().rendered();
    assert_eq!(rendered.len(), 2);
    assert!(rendered[0].contains("Open Notepad"));
    assert!(rendered[1].contains("Close Notepad"));
    assert!(rendered.iter().all(|l| !l.contains("Browser")));
}

#[test]
fn test_bindings_only_affect_alt() {
    let mut kb = keyboard();
    kb.rebind_alt("q", CommandBinding::from_text("X", "Y"));

    press_all(&mut kb, &["q", "shift", "q"]);
    kb.undo();
    kb.undo();

    assert_eq!(kb.sink().rendered(), vec!["q | press(q)", "Q | press(q)"]);
}

#[test]
fn test_commands_with_side_effects_run_once_per_press() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let open_tabs = Rc::new(RefCell::new(Vec::<usize>::new()));
    let (open, close) = (open_tabs.clone(), open_tabs.clone());
    let binding = CommandBinding::new(
        move || {
            let mut tabs = open.borrow_mut();
            let id = tabs.len() + 1;
            tabs.push(id);
            format!("Open tab {}", id)
        },
        move || match close.borrow_mut().pop() {
            Some(id) => format!("Close tab {}", id),
            None => "Nothing to close".to_string(),
        },
    );

    let mut kb = keyboard();
    kb.rebind_alt("t", binding);
    press_all(&mut kb, &["alt", "t", "t"]);
    kb.undo();

    assert_eq!(*open_tabs.borrow(), vec![1]);
    assert_eq!(
        kb.sink().rendered(),
        vec![
            "Open tab 1 | press(alt+t)",
            "Open tab 2 | press(alt+t)",
            "Close tab 2 | press(alt+t)",
        ]
    );
}
