use crate::lang::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    offset: Option<usize>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::Error::new($crate::ErrorCode::$err)
    };
    ($err:ident, ..$offset:expr) => {
        $crate::Error::new($crate::ErrorCode::$err).at_offset($offset)
    };
    ($err:ident, $line:expr) => {
        $crate::Error::new($crate::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::Error::new($crate::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$offset:expr; $msg:expr) => {
        $crate::Error::new($crate::ErrorCode::$err)
            .at_offset($offset)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$offset:expr) => {
        $crate::Error::new($crate::ErrorCode::$err)
            .in_line_number($line)
            .at_offset($offset)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            offset: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn at_offset(self, offset: usize) -> Error {
        debug_assert!(self.offset.is_none());
        Error {
            offset: Some(offset),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    EmptyInput,
    InvalidMarker,
    TruncatedRecord,
    Overflow,
    FileNotFound,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self {
            EmptyInput => "EMPTY INPUT",
            InvalidMarker => "NOT A VALID HX-20 BASIC FILE",
            TruncatedRecord => "TRUNCATED RECORD",
            Overflow => "OVERFLOW",
            FileNotFound => "FILE NOT FOUND",
            InternalError => "INTERNAL ERROR",
        };
        write!(f, "{}", code_str)
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        if let Some(offset) = self.offset {
            suffix.push_str(&format!(" @ {}", offset));
        }
        if suffix.is_empty() {
            write!(f, "{}", self.code)?;
        } else {
            write!(f, "{} IN{}", self.code, suffix)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
