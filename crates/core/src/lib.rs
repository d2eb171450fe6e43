//! Menu and command dispatch core for an interactive terminal session.
//!
//! The model: a [`menu::MenuTree`] of navigable menus, each holding ordered
//! [`command::CommandSpec`]s with declarative argument schemas; a
//! [`dispatch::Dispatcher`] that consumes one line at a time from a
//! [`queue::CommandQueue`] or an interactive [`dispatch::InputSource`],
//! validates flags against the schema, and runs the handler. Output goes
//! through a [`dispatch::Presenter`] and, for commands that opt in, the
//! [`export`] writers.
//!
//! The crate is UI-free: prompts, rendering and completion UI live with the
//! binary, which plugs in via the `InputSource` and `Presenter` traits.

pub mod command;
pub mod completion;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod menu;
pub mod queue;
pub mod schema;
pub mod session;
pub mod table;

pub use command::{CommandOutcome, CommandSpec, Handler, HandlerOutput};
pub use dispatch::{Dispatcher, DispatcherState, InputSource, NullPresenter, Presenter};
pub use error::{Error, Result};
pub use export::ExportPolicy;
pub use menu::{Menu, MenuTree};
pub use schema::{ArgumentBundle, ArgumentSchema, FlagSpec, UnknownFlagPolicy};
pub use session::SessionConfig;
pub use table::Table;
