pub mod cache;
pub mod controller;
pub mod filter;
pub mod preview;
pub mod toasts;
pub mod ui;

pub use controller::{ActionError, ActionResult, ClientState, Controller, ControllerSettings, Snapshot};
pub use filter::SearchFilter;
pub use ui::{LoginForm, Modal, RegisterForm, ShareDraft, View};
