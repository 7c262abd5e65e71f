//! Per-request completion input
//!
//! An [`Input`] describes one completion request: the raw line, the cursor
//! offset, and the pieces a mission fills in while its condition is
//! re-validated — capture groups, the resolved receiver object, the token
//! being completed, and an optional prefix to re-attach to results.
//!
//! A fresh `Input` is built for every dispatch attempt; only the owning
//! mission mutates it, and the receiver object is attached at most once.

use crate::eval::Value;

/// One completion request as seen by a mission.
#[derive(Default)]
pub struct Input {
    /// Raw input line as supplied by the host.
    line: String,

    /// Cursor position (byte index, clamped to a char boundary).
    cursor: usize,

    /// Capture groups from the matched condition, group 0 first.
    matched: Vec<Option<String>>,

    /// Receiver object resolved during condition evaluation, if any.
    object: Option<Value>,

    /// The partial token being completed.
    token: String,

    /// Prefix re-attached to every completion (e.g. a leading quote).
    completion_prefix: Option<String>,
}

impl Input {
    /// Build an input for `line` with the cursor at byte offset `cursor`.
    ///
    /// The cursor is clamped to the line length and backed up to the
    /// nearest char boundary. The token defaults to the trailing
    /// whitespace-delimited word before the cursor; missions that capture
    /// an explicit remainder override it.
    pub fn new(line: impl Into<String>, cursor: usize) -> Self {
        let line = line.into();
        let cursor = clamp_to_boundary(&line, cursor);
        let token = trailing_word(&line[..cursor]).to_string();
        Self {
            line,
            cursor,
            matched: Vec::new(),
            object: None,
            token,
            completion_prefix: None,
        }
    }

    /// The full raw line.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Cursor position as a byte offset into [`line`](Self::line).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The portion of the line up to the cursor — what conditions match
    /// against.
    pub fn line_to_cursor(&self) -> &str {
        &self.line[..self.cursor]
    }

    /// The partial token being completed.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Capture groups from the matched condition (group 0 is the whole
    /// match). Empty until a mission's condition has matched.
    pub fn matched(&self) -> &[Option<String>] {
        &self.matched
    }

    /// Convenience accessor for a single capture group.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.matched.get(index)?.as_deref()
    }

    /// The resolved receiver object, when the mission evaluated one.
    pub fn object(&self) -> Option<&Value> {
        self.object.as_ref()
    }

    /// Downcast the receiver object to a concrete host type.
    pub fn object_as<T: std::any::Any>(&self) -> Option<&T> {
        self.object.as_ref()?.downcast_ref::<T>()
    }

    /// Prefix that will be re-attached to every completion.
    pub fn completion_prefix(&self) -> Option<&str> {
        self.completion_prefix.as_deref()
    }

    pub(crate) fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub(crate) fn set_matched(&mut self, matched: Vec<Option<String>>) {
        self.matched = matched;
    }

    /// Attach the resolved receiver. Set once; later calls are ignored.
    pub(crate) fn set_object(&mut self, object: Value) {
        if self.object.is_none() {
            self.object = Some(object);
        }
    }

    pub(crate) fn set_completion_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.completion_prefix = Some(prefix);
        }
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("line", &self.line)
            .field("cursor", &self.cursor)
            .field("token", &self.token)
            .field("matched", &self.matched)
            .field("object", &self.object.is_some())
            .field("completion_prefix", &self.completion_prefix)
            .finish()
    }
}

/// Back `cursor` up to the nearest char boundary at or before it.
fn clamp_to_boundary(line: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(line.len());
    while !line.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// The trailing whitespace-delimited word of `line`, possibly empty.
pub(crate) fn trailing_word(line: &str) -> &str {
    line.rsplit(char::is_whitespace).next().unwrap_or("")
}
