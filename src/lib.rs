//! # HX-20 Tape
//!
//! Cassette tooling for the Epson HX-20 as it was in 1983.
//!
//! Two independent pipelines live here. The [`lang`] module converts BASIC
//! source text to the tokenized program image the interpreter loads, and
//! back. The [`tape`] module turns any program (text or tokenized) into a
//! cassette signal: double-written, checksummed blocks rendered as
//! pulse-width modulated 8-bit audio, ready to be saved as a WAV file and
//! played into the HX-20's `CAS1` input.
//!
//! ```
//! let image = hx20::lang::tokenize(b"10 PRINT \"HELLO\"\n").unwrap();
//! assert_eq!(image[0], 0xFF);
//! let text = hx20::lang::detokenize(&image).unwrap();
//! assert_eq!(text, "10  PRINT \"HELLO\"\n");
//! ```
//!
//! On the HX-20 type `LOAD"CAS1:"`, press RETURN and start playback.

mod error;

pub mod lang;
pub mod tape;
pub mod term;

pub use error::{Error, ErrorCode};
