//! Mock email tools.

pub mod common;
pub mod delete;
pub mod list;
pub mod read;
pub mod send;

pub use delete::{DeleteEmailParams, DeleteEmailTool};
pub use list::{ListEmailsParams, ListEmailsTool};
pub use read::{ReadEmailParams, ReadEmailTool};
pub use send::{SendEmailParams, SendEmailTool};
