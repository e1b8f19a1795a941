// ABOUTME: Editing and presenting session for the quickslides engine
// ABOUTME: Keeps the document, the edit caret and the active slide consistent across input sources

//! A [`Session`] is the context object every input handler talks to.
//!
//! ```text
//! Session
//! ├── document: String            // the only authoritative text
//! ├── spans: Vec<SlideSpan>       // derived, rebuilt on every change
//! ├── cursor: usize               // caret of the text editing surface
//! ├── navigator: Navigator        // active index + mode
//! ├── gestures: GestureRecognizer // drag input
//! ├── pending_echo: Option<usize> // caret position the engine itself set
//! └── store: Box<dyn DocumentStore> // saved on every edit and on present
//! ```
//!
//! Keyboard, gesture and click handlers never touch the index directly.
//! They go through [`Session::key`], [`Session::pointer_up`] and
//! [`Session::select_slide`], which apply exactly one navigation transition
//! per input event and return the side effects the host has to perform.

use crate::classify::{classify, ContentVariant};
use crate::config::Config;
use crate::gesture::{GestureFrame, GestureRecognizer, PointerSample};
use crate::keymap::{KeyAction, KeyBindings, KeyPress};
use crate::mapper::{clamp_offset, offset_to_slide_index, selection_for_span, Selection};
use crate::navigation::{Mode, NavCommand, NavEffect, Navigator};
use crate::segment::{segment, SlideSpan};
use crate::store::{load_or_default, DocumentStore, MemoryStore, DEFAULT_DOCUMENT};
use log::{debug, info, warn};

/// Work the host performs after an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEffect {
    /// Move the editor's selection and scroll it into view.
    RelocateCursor(Selection),
    /// The presentation view should jump straight to this slide.
    JumpTo(usize),
    /// The presentation view should animate to `to`.
    SlideChanged { from: usize, to: usize },
    Entered { index: usize },
    /// Presentation mode ended; the editor resumes on this slide.
    Exited { resume_index: usize },
    ToggleFullscreen,
}

pub struct Session {
    document: String,
    spans: Vec<SlideSpan>,
    cursor: usize,
    navigator: Navigator,
    gestures: GestureRecognizer,
    bindings: KeyBindings,
    pending_echo: Option<usize>,
    store: Box<dyn DocumentStore>,
}

impl Session {
    /// A session whose saves go to an in-process [`MemoryStore`].
    pub fn new(document: impl Into<String>, config: &Config) -> Self {
        Self::with_store(document, config, Box::new(MemoryStore::new()))
    }

    /// Open whatever `store` holds, or the default document when it holds
    /// nothing or cannot be read.
    pub fn open(store: Box<dyn DocumentStore>, config: &Config) -> Self {
        let document = match load_or_default(store.as_ref(), DEFAULT_DOCUMENT) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to load stored document, using default: {}", e);
                DEFAULT_DOCUMENT.to_string()
            }
        };
        Self::with_store(document, config, store)
    }

    pub fn with_store(
        document: impl Into<String>,
        config: &Config,
        store: Box<dyn DocumentStore>,
    ) -> Self {
        let document = document.into();
        let spans = segment(&document);
        let navigator = Navigator::new(spans.len());
        info!("Session opened with {} slides", spans.len());
        Self {
            document,
            spans,
            cursor: 0,
            navigator,
            gestures: GestureRecognizer::new(config.gesture.clone()),
            bindings: config.bindings,
            pending_echo: None,
            store,
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn slides(&self) -> &[SlideSpan] {
        &self.spans
    }

    pub fn slide_count(&self) -> usize {
        self.spans.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn index(&self) -> usize {
        self.navigator.index()
    }

    pub fn mode(&self) -> Mode {
        self.navigator.mode()
    }

    pub fn current_slide(&self) -> Option<&SlideSpan> {
        self.spans.get(self.navigator.index())
    }

    /// The variant to render for the active slide, `None` with zero slides.
    pub fn current_variant(&self) -> Option<ContentVariant> {
        self.current_slide().map(|span| classify(&span.text))
    }

    pub fn gesture_frame(&self) -> GestureFrame {
        self.gestures.frame()
    }

    /// The user typed: new text and the caret after the edit.
    pub fn edit(&mut self, text: impl Into<String>, cursor: usize) {
        self.replace(text.into());
        self.cursor = clamp_offset(&self.document, cursor);
        self.follow_cursor();
        self.persist();
    }

    /// Replace the document out of band (import, share link, store load).
    /// The caret is kept where it was, clamped to the new text.
    pub fn set_document(&mut self, text: impl Into<String>) {
        self.replace(text.into());
        self.cursor = clamp_offset(&self.document, self.cursor);
        self.follow_cursor();
        self.persist();
    }

    fn replace(&mut self, text: String) {
        self.document = text;
        self.spans = segment(&self.document);
        self.navigator.set_slide_count(self.spans.len());
        self.pending_echo = None;
    }

    /// The text surface reports a caret move.
    ///
    /// Moves the engine made itself come back here as an echo; those are
    /// absorbed so the forward mapping never fights a relocation.
    pub fn cursor_moved(&mut self, offset: usize) {
        let offset = clamp_offset(&self.document, offset);
        if self.pending_echo.take() == Some(offset) {
            debug!("session: absorbed caret echo at {}", offset);
            self.cursor = offset;
            return;
        }
        self.cursor = offset;
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        let index = offset_to_slide_index(self.cursor, &self.spans);
        self.navigator.apply(NavCommand::Follow(index));
    }

    /// A preview was clicked.
    pub fn select_slide(&mut self, index: usize) -> Vec<SessionEffect> {
        self.run(NavCommand::GoTo(index))
    }

    pub fn present(&mut self) -> Vec<SessionEffect> {
        self.persist();
        self.run(NavCommand::Present)
    }

    /// A failed save is logged and never blocks editing or navigation.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.document) {
            warn!("Failed to save document: {}", e);
        }
    }

    pub fn exit(&mut self) -> Vec<SessionEffect> {
        self.run(NavCommand::Exit)
    }

    /// A key was pressed while the presentation view has focus.
    pub fn key(&mut self, press: KeyPress) -> Vec<SessionEffect> {
        if self.navigator.mode() != Mode::Presenting {
            return Vec::new();
        }
        match self.bindings.action(press) {
            KeyAction::Navigate(command) => self.run(command),
            KeyAction::ToggleFullscreen => vec![SessionEffect::ToggleFullscreen],
            KeyAction::Ignored => Vec::new(),
        }
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.gestures.begin(sample);
    }

    pub fn pointer_move(&mut self, sample: PointerSample) -> GestureFrame {
        self.gestures.update(sample)
    }

    pub fn pointer_up(&mut self, sample: PointerSample) -> Vec<SessionEffect> {
        let intent = self.gestures.end(sample);
        match intent.command() {
            Some(command) if self.navigator.mode() == Mode::Presenting => self.run(command),
            _ => Vec::new(),
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.gestures.cancel();
    }

    fn run(&mut self, command: NavCommand) -> Vec<SessionEffect> {
        match self.navigator.apply(command) {
            NavEffect::None => Vec::new(),
            NavEffect::Changed { from, to } => vec![SessionEffect::SlideChanged { from, to }],
            NavEffect::Jump { to } => {
                let mut effects: Vec<SessionEffect> = self.relocate(to).into_iter().collect();
                effects.push(SessionEffect::JumpTo(to));
                effects
            }
            NavEffect::Entered { index } => vec![SessionEffect::Entered { index }],
            NavEffect::Exited { resume_index } => {
                let mut effects = vec![SessionEffect::Exited { resume_index }];
                effects.extend(self.relocate(resume_index));
                effects
            }
        }
    }

    /// Put the caret on slide `index` without re-running the forward mapping.
    fn relocate(&mut self, index: usize) -> Option<SessionEffect> {
        let selection = selection_for_span(&self.spans, index, &self.document)?;
        self.cursor = selection.start;
        self.pending_echo = Some(selection.start);
        Some(SessionEffect::RelocateCursor(selection))
    }
}
