//! Sequential full-size inspection over the currently filtered sequence.
//!
//! The viewer is a small state machine: `Closed`, or `Open` at a valid
//! index into the sequence it was opened over. Navigation clamps at both
//! boundaries instead of wrapping. The viewer does not own the sequence;
//! when the filtered sequence changes identity or length while open, the
//! caller must close or reopen it.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::gallery::Photo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewerState {
    Closed,
    Open { index: usize },
}

/// Which asset the renderer should display for the current position.
///
/// Loading the full-size asset may fail; the consumer then retries exactly
/// once with the thumbnail, and after that shows a broken-image indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaySource {
    Full,
    Thumbnail,
    Broken,
}

/// Release handle for an acquired keyboard listener. The release callback
/// runs exactly once, when the guard is dropped.
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerGuard {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard with nothing to release, for hooks without a real resource.
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// Source of the keyboard-listening resource. `acquire` is called on every
/// Closed -> Open transition; the returned guard is dropped on every path
/// out of the open state, including the viewer being dropped while open.
pub trait KeyboardHook {
    fn acquire(&mut self) -> ListenerGuard;
}

/// Hook for consumers without key input (tests, headless embedding).
#[derive(Debug, Default)]
pub struct NullKeyboardHook;

impl KeyboardHook for NullKeyboardHook {
    fn acquire(&mut self) -> ListenerGuard {
        ListenerGuard::noop()
    }
}

pub struct Viewer<H = NullKeyboardHook> {
    hook: H,
    state: ViewerState,
    /// Length of the sequence the viewer was opened over.
    len: usize,
    source: DisplaySource,
    guard: Option<ListenerGuard>,
}

impl Default for Viewer<NullKeyboardHook> {
    fn default() -> Self {
        Self::new(NullKeyboardHook)
    }
}

impl<H: KeyboardHook> Viewer<H> {
    pub fn new(hook: H) -> Self {
        Self {
            hook,
            state: ViewerState::Closed,
            len: 0,
            source: DisplaySource::Full,
            guard: None,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            ViewerState::Open { index } => Some(index),
            ViewerState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    /// Opens at `index` into a sequence of `sequence_len` items. Returns
    /// false (and stays closed) for an out-of-range index. Called while
    /// already open, this re-targets like [`Viewer::jump`] but also adopts
    /// the new sequence length.
    pub fn open(&mut self, index: usize, sequence_len: usize) -> bool {
        if index >= sequence_len {
            debug!("rejecting open at {index} over sequence of {sequence_len}");
            return false;
        }
        self.len = sequence_len;
        self.set_index(index);
        if self.guard.is_none() {
            self.guard = Some(self.hook.acquire());
        }
        true
    }

    /// Direct index selection while open. No-op when closed or out of
    /// range.
    pub fn jump(&mut self, index: usize) -> bool {
        if !self.is_open() || index >= self.len {
            return false;
        }
        self.set_index(index);
        true
    }

    /// Advances by one; clamps at the end of the sequence.
    pub fn next(&mut self) -> bool {
        match self.state {
            ViewerState::Open { index } if index + 1 < self.len => {
                self.set_index(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Steps back by one; clamps at index 0.
    pub fn previous(&mut self) -> bool {
        match self.state {
            ViewerState::Open { index } if index > 0 => {
                self.set_index(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Closes the viewer, releasing the keyboard listener. No-op when
    /// already closed.
    pub fn close(&mut self) {
        self.state = ViewerState::Closed;
        self.len = 0;
        self.source = DisplaySource::Full;
        // Dropping the guard runs the release callback
        self.guard = None;
    }

    pub fn has_next(&self) -> bool {
        matches!(self.state, ViewerState::Open { index } if index + 1 < self.len)
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.state, ViewerState::Open { index } if index > 0)
    }

    /// Moving to any position resets the display fallback for it.
    fn set_index(&mut self, index: usize) {
        self.state = ViewerState::Open { index };
        self.source = DisplaySource::Full;
    }

    pub fn display_source(&self) -> DisplaySource {
        self.source
    }

    /// Records a failed asset load for the current position: full-size
    /// falls back to the thumbnail once, a failed thumbnail is final.
    pub fn mark_load_failed(&mut self) {
        if !self.is_open() {
            return;
        }
        self.source = match self.source {
            DisplaySource::Full => DisplaySource::Thumbnail,
            DisplaySource::Thumbnail | DisplaySource::Broken => DisplaySource::Broken,
        };
    }

    /// URL the renderer should load for `photo` at the current position,
    /// `None` once the fallback is exhausted.
    pub fn display_url<'a>(&self, photo: &'a Photo) -> Option<&'a str> {
        match self.source {
            DisplaySource::Full => Some(&photo.url),
            DisplaySource::Thumbnail => Some(photo.thumb()),
            DisplaySource::Broken => None,
        }
    }
}

impl<H> fmt::Debug for Viewer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("state", &self.state)
            .field("len", &self.len)
            .field("source", &self.source)
            .finish()
    }
}
