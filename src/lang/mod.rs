/*!
# Rust Language Module

This Rust module converts HX-20 BASIC between source text and the
tokenized program image the interpreter loads.

*/

mod lex;
mod line;
mod listing;
mod program;
pub mod token;

pub type LineNumber = Option<u16>;

pub use lex::{lex, BasicLexer, Lexeme};
pub use line::Line;
pub use listing::{detokenize, Lines, Listing};
pub use program::{tokenize, Program, PROGRAM_HEADER_LEN, PROGRAM_MARKER};
