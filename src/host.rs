// File: ./src/host.rs
/*! Editor host capability abstraction.

Everything the workflows need from the surrounding editor is funneled
through the narrow, object-safe `Host` trait: input prompts, quick
picks, the user-visible message surface, URL opening, and document
handles. Workflow and explorer logic stay host-agnostic and can be
exercised against the in-memory `MemoryHost` without a live editor.
*/

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A selected byte range inside the active document. A collapsed
/// selection (`start == end`) is a bare cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn cursor(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }
}

/// Snapshot of the host's active document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: Option<Utf8PathBuf>,
    pub text: String,
    pub selections: Vec<Selection>,
}

/// The capability set the host editor provides.
///
/// Prompt-style methods return `None` when the user dismisses the
/// prompt; workflows treat that as a silent abort.
pub trait Host: Send + Sync {
    /// Ask the user for a line of input.
    fn show_prompt(&self, prompt: &str, initial: &str) -> Option<String>;
    /// Ask the user to select any number of the given options.
    fn pick_many(&self, options: &[String]) -> Option<Vec<String>>;
    fn show_error(&self, message: &str);
    fn show_info(&self, message: &str);
    fn open_url(&self, url: &str);
    /// Open the document at `path` and make it the active document.
    fn open_document(&self, path: &Utf8Path) -> Result<(), String>;
    fn active_document(&self) -> Option<Document>;
    /// Replace the active document's full text, collapsing all selections.
    fn replace_active_text(&self, text: &str) -> Result<(), String>;
    fn save_active_document(&self) -> Result<(), String>;
}

// --- In-memory implementation ---

/// Scriptable in-memory host used by tests and headless embedding.
///
/// Prompt and pick replies are queued with `push_prompt_reply` /
/// `push_pick_reply` and consumed in FIFO order; an empty queue behaves
/// like a dismissed prompt.
#[derive(Debug, Default)]
pub struct MemoryHost {
    prompt_replies: Mutex<VecDeque<Option<String>>>,
    pick_replies: Mutex<VecDeque<Option<Vec<String>>>>,
    errors: Mutex<Vec<String>>,
    infos: Mutex<Vec<String>>,
    opened_urls: Mutex<Vec<String>>,
    active: Mutex<Option<Document>>,
    save_count: Mutex<usize>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_prompt_reply(&self, reply: Option<&str>) {
        self.prompt_replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_string));
    }

    pub fn push_pick_reply(&self, reply: Option<Vec<String>>) {
        self.pick_replies.lock().unwrap().push_back(reply);
    }

    pub fn set_active_document(&self, doc: Document) {
        *self.active.lock().unwrap() = Some(doc);
    }

    pub fn clear_active_document(&self) {
        *self.active.lock().unwrap() = None;
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened_urls.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

impl Host for MemoryHost {
    fn show_prompt(&self, _prompt: &str, _initial: &str) -> Option<String> {
        self.prompt_replies.lock().unwrap().pop_front().flatten()
    }

    fn pick_many(&self, options: &[String]) -> Option<Vec<String>> {
        let reply = self.pick_replies.lock().unwrap().pop_front().flatten()?;
        // A real quick pick can only return offered options.
        Some(
            reply
                .into_iter()
                .filter(|r| options.contains(r))
                .collect(),
        )
    }

    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn show_info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn open_url(&self, url: &str) {
        self.opened_urls.lock().unwrap().push(url.to_string());
    }

    fn open_document(&self, path: &Utf8Path) -> Result<(), String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
        *self.active.lock().unwrap() = Some(Document {
            path: Some(path.to_path_buf()),
            text,
            selections: vec![Selection::cursor(0)],
        });
        Ok(())
    }

    fn active_document(&self) -> Option<Document> {
        self.active.lock().unwrap().clone()
    }

    fn replace_active_text(&self, text: &str) -> Result<(), String> {
        let mut guard = self.active.lock().unwrap();
        let doc = guard.as_mut().ok_or("No active document")?;
        doc.text = text.to_string();
        doc.selections = vec![Selection::cursor(text.len())];
        Ok(())
    }

    fn save_active_document(&self) -> Result<(), String> {
        let guard = self.active.lock().unwrap();
        let doc = guard.as_ref().ok_or("No active document")?;
        if let Some(path) = &doc.path {
            std::fs::write(path, &doc.text)
                .map_err(|e| format!("Failed to save '{}': {}", path, e))?;
        }
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}
