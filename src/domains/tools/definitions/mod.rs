//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file and knows how to register itself.

pub mod email;

pub use email::{DeleteEmailTool, ListEmailsTool, ReadEmailTool, SendEmailTool};
