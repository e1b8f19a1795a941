// ABOUTME: Library module for the quickslides program.
// ABOUTME: Contains the slide document engine and the collaborators around it.

// Reexport modules
pub mod classify;
pub mod config;
pub mod errors;
pub mod gesture;
pub mod html;
pub mod keymap;
pub mod mapper;
pub mod navigation;
pub mod render;
pub mod segment;
pub mod session;
pub mod share;
pub mod store;
pub mod utils;
pub mod watch;

// Reexport common types and functions
pub use classify::{classify, ContentVariant};
pub use config::{Config, GestureConfig};
pub use errors::{Result, SlideError};
pub use gesture::{GestureFrame, GestureRecognizer, PointerSample, SwipeIntent};
pub use html::{generate_deck, generate_slide_page, write_html_to_file};
pub use keymap::{Key, KeyAction, KeyBindings, KeyPress};
pub use mapper::{offset_to_slide_index, slide_index_to_selection, Selection};
pub use navigation::{transition, Mode, NavCommand, NavEffect, NavState, Navigator};
pub use render::{render_variant, ComrakRenderer, MarkdownRenderer};
pub use segment::{join, segment, SlideSpan, SEPARATOR};
pub use session::{Session, SessionEffect};
pub use store::{DocumentStore, FileStore, MemoryStore, DEFAULT_DOCUMENT, DOCUMENT_KEY};
pub use watch::{watch_document, WatchConfig};
