//! Command language: tokenizer, keyword table, assembler, readers.

pub mod assembler;
pub mod keyword;
pub mod model;
pub mod reader;
pub mod tokenizer;

pub use assembler::{parse_script, Assembler, CommandParser};
pub use model::{Command, CommandKind, CommandOptions, Properties, WidgetKind, WidgetSet};
pub use reader::{spawn_reader, CommandFeed, CommandReader, Handoff};
pub use tokenizer::{Lexeme, Tokenizer};
