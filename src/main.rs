//! # HX-20
//!
//! Tokenizes BASIC programs and records them as cassette audio.
//!

fn main() {
    hx20::term::main()
}
