//! Scanner: turns a character source into positioned tokens
//!
//! The [`Scanner`] reads its source one character at a time through a
//! [`Cursor`], drives the [`Machine`] from state to state and pushes every
//! token into a [`TokenSink`] as soon as it is complete.

mod cursor;
mod machine;
mod scanner;
mod sink;
mod stream;

pub use cursor::Cursor;
pub use machine::{Halt, Machine, State, Step, Transition};
pub use scanner::{Scanner, tokenize};
pub use sink::TokenSink;
pub use stream::{TokenStream, channel, spawn};
