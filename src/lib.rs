mod app;
mod config;
mod error;
mod key_event;
mod lang;
mod launcher;
mod list;
mod ui;
mod utils;
mod view;

// Re-export commonly used types
pub use app::{App, ConnectionAction, MenuAction, PendingCommand};
pub use config::manager::{ConnectionProfile, ConnectionStore, Document};
pub use error::{AppError, Result};
pub use key_event::KeyFlow;
pub use lang::Language;
pub use list::{ListController, ListRow};
pub use utils::{init_panic_hook, init_tracing, restore_tui};
pub use view::{Focus, FocusContext, ModalKind, View};
