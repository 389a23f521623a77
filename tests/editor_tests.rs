use blocknote::document::block::{Block, BlockId, BlockType};
use blocknote::document::tree::BlockTree;
use blocknote::editor::host::Host;
use blocknote::editor::intent::BlockIntent;
use blocknote::editor::mode::EditorMode;
use blocknote::editor::state::EditorState;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything a host saw, in call order.
#[derive(Debug, Default)]
struct Calls {
    updates: Vec<BlockTree>,
    sends: usize,
    order: Vec<&'static str>,
}

#[derive(Clone, Default)]
struct RecordingHost(Rc<RefCell<Calls>>);

impl Host for RecordingHost {
    fn update_state(&mut self, forest: &BlockTree) {
        let mut calls = self.0.borrow_mut();
        calls.updates.push(forest.clone());
        calls.order.push("update_state");
    }

    fn send_to_server(&mut self) {
        let mut calls = self.0.borrow_mut();
        calls.sends += 1;
        calls.order.push("send_to_server");
    }
}

fn id(s: &str) -> BlockId {
    BlockId::from(s)
}

fn editor_with(blocks: Vec<Block>) -> (EditorState, Rc<RefCell<Calls>>) {
    let host = RecordingHost::default();
    let calls = host.0.clone();
    let mut state = EditorState::new_with_default_theme(BlockTree::from_blocks(blocks));
    state.set_host(Box::new(host));
    (state, calls)
}

fn text(name: &str) -> Block {
    Block::new(id(name), BlockType::Text, name)
}

#[test]
fn test_host_sees_each_mutation_once() {
    let (mut state, calls) = editor_with(vec![text("a"), text("b")]);

    assert!(state.indent(&id("b"), &[]));

    let calls = calls.borrow();
    assert_eq!(calls.updates.len(), 1);
    assert_eq!(calls.sends, 1);
    assert_eq!(calls.order, vec!["update_state", "send_to_server"]);
    assert_eq!(&calls.updates[0], state.tree());
}

#[test]
fn test_noops_do_not_reach_host() {
    let (mut state, calls) = editor_with(vec![text("a"), text("b")]);

    assert!(!state.indent(&id("a"), &[]));
    assert!(!state.unindent(&id("a"), &[]));
    assert!(!state.delete(&id("ghost"), &[]));
    assert!(!state.set_content(&id("a"), &[], "a"));
    assert!(state.insert_after(&id("ghost"), &[], BlockType::Text).is_none());

    assert!(calls.borrow().updates.is_empty());
    assert_eq!(calls.borrow().sends, 0);
    assert!(!state.is_dirty());
}

#[test]
fn test_focus_moves_update_state_without_send() {
    let (mut state, calls) = editor_with(vec![text("a"), text("b")]);

    assert!(state.focus_next());

    assert_eq!(calls.borrow().updates.len(), 1);
    assert_eq!(calls.borrow().sends, 0);
    assert!(!state.is_dirty());
    assert_eq!(state.tree().focused().unwrap().id, id("b"));
}

#[test]
fn test_apply_intents_in_sequence() {
    let (mut state, calls) = editor_with(vec![Block::new(id("h"), BlockType::Heading1, "Title")]);

    assert!(state.apply(BlockIntent::EnterSplit {
        id: id("h"),
        parent_path: vec![],
        block_type: BlockType::Text,
    }));
    let new_id = state.tree().focused().unwrap().id.clone();

    assert!(state.apply(BlockIntent::SetContent {
        id: new_id.clone(),
        parent_path: vec![],
        content: "body".to_string(),
    }));
    assert!(state.apply(BlockIntent::Indent {
        id: new_id.clone(),
        parent_path: vec![],
    }));

    let nested = state.tree().identify(&new_id, &[id("h")]).unwrap();
    assert_eq!(nested.content, "body");
    assert!(nested.is_focused);

    assert!(state.apply(BlockIntent::Unindent {
        id: new_id.clone(),
        parent_path: vec![id("h")],
    }));
    assert!(state.apply(BlockIntent::SetContent {
        id: new_id.clone(),
        parent_path: vec![],
        content: String::new(),
    }));
    assert!(state.apply(BlockIntent::Delete {
        id: new_id,
        parent_path: vec![],
    }));

    assert_eq!(state.tree().len(), 1);
    assert_eq!(state.tree().focused().unwrap().id, id("h"));
    assert_eq!(calls.borrow().sends, 6);
}

#[test]
fn test_stale_intent_is_ignored() {
    let (mut state, calls) = editor_with(vec![text("a").with_children(vec![text("b")])]);

    // "b" was addressed before it moved under "a"
    assert!(!state.apply(BlockIntent::Delete {
        id: id("b"),
        parent_path: vec![],
    }));

    assert_eq!(state.tree().len(), 2);
    assert_eq!(calls.borrow().sends, 0);
}

#[test]
fn test_undo_restores_prior_forest_exactly() {
    let (mut state, _calls) = editor_with(vec![
        text("a"),
        text("b").with_children(vec![text("b1")]),
        text("c"),
    ]);
    let original = state.tree().clone();

    assert!(state.delete(&id("b"), &[]));
    let after_delete = state.tree().clone();
    assert_ne!(after_delete, original);

    assert!(state.undo());
    assert_eq!(state.tree(), &original);

    assert!(state.redo());
    assert_eq!(state.tree(), &after_delete);
}

#[test]
fn test_undo_notifies_host() {
    let (mut state, calls) = editor_with(vec![text("a"), text("b")]);

    state.indent(&id("b"), &[]);
    state.undo();

    let calls = calls.borrow();
    assert_eq!(calls.sends, 2);
    assert_eq!(calls.updates[1].blocks().len(), 2);
}

#[test]
fn test_typing_run_ends_on_mode_change() {
    let (mut state, _calls) = editor_with(vec![text("a")]);

    state.set_content(&id("a"), &[], "a1");
    state.set_content(&id("a"), &[], "a12");
    state.set_mode(EditorMode::Normal);
    state.set_mode(EditorMode::Insert);
    state.set_content(&id("a"), &[], "a123");

    assert!(state.undo());
    assert_eq!(state.tree().blocks()[0].content, "a12");
    assert!(state.undo());
    assert_eq!(state.tree().blocks()[0].content, "a");
    assert!(!state.undo());
}

#[test]
fn test_new_edit_after_undo_drops_redo() {
    let (mut state, _calls) = editor_with(vec![text("a"), text("b")]);

    state.indent(&id("b"), &[]);
    state.undo();
    state.toggle_block_type();

    assert!(!state.redo());
    assert!(state.tree().blocks()[0].is_heading());
}

#[test]
fn test_undo_edit_undo_restores_each_state() {
    let (mut state, _calls) = editor_with(vec![text("a"), text("b")]);

    state.set_content(&id("a"), &[], "ab");
    let typed = state.tree().clone();
    state.indent(&id("b"), &[]);

    assert!(state.undo());
    assert_eq!(state.tree(), &typed);

    state.set_content(&id("a"), &[], "abc");
    assert!(state.undo());
    assert_eq!(state.tree(), &typed);
    assert_eq!(state.tree().blocks()[0].content, "ab");
}

#[test]
fn test_redo_then_type_keeps_redone_state() {
    let (mut state, _calls) = editor_with(vec![text("a")]);

    state.set_content(&id("a"), &[], "a1");
    state.undo();
    state.redo();
    let redone = state.tree().clone();

    state.set_content(&id("a"), &[], "a12");
    assert!(state.undo());
    assert_eq!(state.tree(), &redone);
}

#[test]
fn test_start_document_is_one_undo_step() {
    let (mut state, calls) = editor_with(vec![]);

    let new_id = state.start_document("h");
    state.set_content(&new_id, &[], "hi");

    assert_eq!(state.tree().blocks()[0].content, "hi");
    assert_eq!(calls.borrow().sends, 2);

    assert!(state.undo());
    assert!(state.tree().is_empty());
    assert!(!state.undo());
}

#[test]
fn test_undo_limit_bounds_history() {
    let (mut state, _calls) = editor_with(vec![text("a")]);
    state.set_undo_limit(2);

    state.append_block(BlockType::Text);
    state.append_block(BlockType::Text);
    state.append_block(BlockType::Text);

    assert!(state.undo());
    assert!(state.undo());
    assert!(!state.undo());
    assert_eq!(state.tree().len(), 2);
}

#[test]
fn test_append_block_on_empty_document() {
    let (mut state, calls) = editor_with(vec![]);
    assert!(state.tree().focused().is_none());

    let new_id = state.append_block(BlockType::Heading1);

    assert_eq!(state.tree().focused().unwrap().id, new_id);
    assert!(state.is_dirty());
    assert_eq!(calls.borrow().sends, 1);
}

#[test]
fn test_to_config_reflects_settings() {
    let (mut state, _calls) = editor_with(vec![text("a")]);
    state.set_indent_size(4);
    state.set_create_backup(true);
    state.set_undo_limit(10);

    let config = state.to_config();
    assert_eq!(config.indent_size, 4);
    assert!(config.create_backup);
    assert_eq!(config.undo_limit, 10);
    assert_eq!(config.theme, "default-dark");
}
