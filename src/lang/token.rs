use std::collections::HashMap;
use std::sync::OnceLock;

/// Prefix byte for function tokens; a function is stored as `[0xFF, byte]`.
pub const FUNCTION_ESCAPE: u8 = 0xFF;

const COMMANDS: &[(&str, u8)] = &[
    ("END", 0x80),
    ("FOR", 0x81),
    ("NEXT", 0x82),
    ("DATA", 0x83),
    ("DIM", 0x84),
    ("READ", 0x85),
    ("LET", 0x86),
    ("GO", 0x87),
    ("RUN", 0x88),
    ("IF", 0x89),
    ("RESTORE", 0x8A),
    ("RETURN", 0x8B),
    ("REM", 0x8C),
    ("'", 0x8D),
    ("STOP", 0x8E),
    ("ELSE", 0x8F),
    ("TRON", 0x90),
    ("TROFF", 0x91),
    ("SWAP", 0x92),
    ("DEFSTR", 0x93),
    ("DEFINT", 0x94),
    ("DEFSNG", 0x95),
    ("DEFDBL", 0x96),
    ("DEFFIL", 0x97),
    ("ON", 0x98),
    ("LPRINT", 0x99),
    ("LLIST", 0x9A),
    ("RENUM", 0x9B),
    ("ERROR", 0x9C),
    ("RESUME", 0x9D),
    ("AUTO", 0x9E),
    ("DELETE", 0x9F),
    ("DEF", 0xA0),
    ("POKE", 0xA1),
    ("PRINT", 0xA2),
    ("CONT", 0xA3),
    ("LIST", 0xA4),
    ("CLEAR", 0xA5),
    ("OPTION", 0xA6),
    ("RANDOMIZE", 0xA7),
    ("WHILE", 0xA8),
    ("WEND", 0xA9),
    ("NEW", 0xAA),
    ("ERASE", 0xAB),
    ("LOADM", 0xAC),
    ("LOAD?", 0xAD),
    ("SAVEM", 0xAE),
    ("SAVE", 0xAF),
    ("LOAD", 0xB0),
    ("MERGE", 0xB1),
    ("OPEN", 0xB2),
    ("CLOSE", 0xB3),
    ("LINE", 0xB4),
    ("SCROLL", 0xB5),
    ("SOUND", 0xB6),
    ("MON", 0xB7),
    ("FILES", 0xB8),
    ("MOTOR", 0xB9),
    ("PUT", 0xBA),
    ("GET", 0xBB),
    ("LOCATES", 0xBC),
    ("LOCATE", 0xBD),
    ("CLS", 0xBE),
    ("KEY", 0xBF),
    ("WIDTH", 0xC0),
    ("PSET", 0xC1),
    ("PRESET", 0xC2),
    ("COPY", 0xC3),
    ("EXEC", 0xC4),
    ("WIND", 0xC5),
    ("GCLS", 0xC6),
    ("SCREEN", 0xC7),
    ("COLOR", 0xC8),
    ("LOGIN", 0xC9),
    ("TITLE", 0xCA),
    ("STAT", 0xCB),
    ("PCOPY", 0xCC),
    ("MEMSET", 0xCD),
    ("BASE", 0xCE),
    ("TAB", 0xCF),
    ("TO", 0xD0),
    ("SUB", 0xD1),
    ("FN", 0xD2),
    ("SPC", 0xD3),
    ("USING", 0xD4),
    ("USR", 0xD5),
    ("ERL", 0xD6),
    ("ERR", 0xD7),
    ("OFF", 0xD8),
    ("ALL", 0xD9),
    ("THEN", 0xDA),
    ("NOT", 0xDB),
    ("STEP", 0xDC),
    ("+", 0xDD),
    ("-", 0xDE),
    ("*", 0xDF),
    ("/", 0xE0),
    ("^", 0xE1),
    ("AND", 0xE2),
    ("OR", 0xE3),
    ("XOR", 0xE4),
    ("EQV", 0xE5),
    ("IMP", 0xE6),
    ("MOD", 0xE7),
    ("\\", 0xE8),
    (">", 0xE9),
    ("=", 0xEA),
    ("<", 0xEB),
];

const FUNCTIONS: &[(&str, u8)] = &[
    ("SGN", 0x80),
    ("INT", 0x81),
    ("ABS", 0x82),
    ("FRE", 0x83),
    ("POS", 0x84),
    ("SQR", 0x85),
    ("LOG", 0x86),
    ("EXP", 0x87),
    ("COS", 0x88),
    ("SIN", 0x89),
    ("TAN", 0x8A),
    ("ATN", 0x8B),
    ("PEEK", 0x8C),
    ("LEN", 0x8D),
    ("STR$", 0x8E),
    ("VAL", 0x8F),
    ("ASC", 0x90),
    ("CHR$", 0x91),
    ("EOF", 0x92),
    ("LOF", 0x93),
    ("CINT", 0x94),
    ("CSNG", 0x95),
    ("CDBL", 0x96),
    ("FIX", 0x97),
    ("SPACE$", 0x98),
    ("HEX$", 0x99),
    ("OCT$", 0x9A),
    ("LEFT$", 0x9B),
    ("RIGHT$", 0x9C),
    ("MID$", 0x9D),
    ("INSTR", 0x9E),
    ("VARPTR", 0x9F),
    ("STRING$", 0xA0),
    ("RND", 0xA1),
    ("TIME", 0xA2),
    ("DATE", 0xA3),
    ("DAY", 0xA4),
    ("INKEY$", 0xA5),
    ("INPUT", 0xA6),
    ("CSRLIN", 0xA7),
    ("POINT", 0xA8),
    ("TAPCNT", 0xA9),
];

static COMMAND_TABLE: OnceLock<TokenTable> = OnceLock::new();
static FUNCTION_TABLE: OnceLock<TokenTable> = OnceLock::new();

/// A single keyword substitution in the binary program format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Command(u8),
    Function(u8),
}

impl Token {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Token::Command(byte) => out.push(*byte),
            Token::Function(byte) => {
                out.push(FUNCTION_ESCAPE);
                out.push(*byte);
            }
        }
    }

    /// `REM` and `'` swallow the remainder of the line.
    pub fn starts_remark(&self) -> bool {
        matches!(self, Token::Command(0x8C) | Token::Command(0x8D))
    }
}

/// Operators are accepted without looking at what follows them.
pub fn is_operator(keyword: &str) -> bool {
    match keyword {
        "AND" | "OR" | "XOR" | "EQV" | "IMP" | "MOD" | "NOT" => true,
        _ => {
            keyword.len() <= 2
                && !keyword
                    .bytes()
                    .next()
                    .map_or(false, |c| c.is_ascii_alphabetic())
        }
    }
}

/// Keyword table ordered for longest-match scanning, plus the reverse map.
#[derive(Debug)]
pub struct TokenTable {
    by_length: Vec<(&'static str, u8)>,
    by_byte: HashMap<u8, &'static str>,
}

impl TokenTable {
    fn new(entries: &'static [(&'static str, u8)]) -> TokenTable {
        let mut by_length = entries.to_vec();
        // Stable, so equal lengths keep table order.
        by_length.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        TokenTable {
            by_length,
            by_byte: entries.iter().map(|&(k, b)| (b, k)).collect(),
        }
    }

    pub fn commands() -> &'static TokenTable {
        COMMAND_TABLE.get_or_init(|| TokenTable::new(COMMANDS))
    }

    pub fn functions() -> &'static TokenTable {
        FUNCTION_TABLE.get_or_init(|| TokenTable::new(FUNCTIONS))
    }

    /// Keywords longest first.
    pub fn keywords(&self) -> std::slice::Iter<'_, (&'static str, u8)> {
        self.by_length.iter()
    }

    pub fn keyword(&self, byte: u8) -> Option<&'static str> {
        self.by_byte.get(&byte).copied()
    }
}
