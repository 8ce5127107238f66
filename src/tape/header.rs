use chrono::{Local, NaiveDateTime};

pub const RECORD_LEN: usize = 80;
pub const NAME_LEN: usize = 8;
pub const SYSTEM_NAME: &[u8; 8] = b"HX-20   ";
pub const VOLUME: &[u8; 2] = b"01";
/// Every block is written twice.
pub const WRITE_MODE_DOUBLE: u8 = b'2';
/// Short inter-block gaps, the motor keeps running.
pub const GAP_MODE_SHORT: u8 = b'S';

/// Source of the timestamp recorded in header and footer blocks.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// `(MMDDYY, HHMMSS)`
    fn stamp(&self) -> (String, String) {
        let now = self.now();
        (
            now.format("%m%d%y").to_string(),
            now.format("%H%M%S").to_string(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Ascii,
    Tokenized,
    Sequential,
    Binary,
}

impl Default for FileType {
    fn default() -> Self {
        FileType::Ascii
    }
}

impl FileType {
    /// Tokenized BASIC images open with 0xFF; anything else is sent as ASCII.
    pub fn detect(program: &[u8]) -> FileType {
        match program.first() {
            Some(&0xFF) => FileType::Tokenized,
            _ => FileType::Ascii,
        }
    }

    /// Bytes 15..20 of the record.
    pub fn pattern(&self) -> [u8; 5] {
        match self {
            FileType::Ascii => [0x00, 0xFF, 0xFF, 0x00, 0x00],
            FileType::Tokenized => [0x00, 0x00, 0x00, 0x00, 0x00],
            FileType::Sequential => [0x01, 0xFF, 0xFF, 0x00, 0x00],
            FileType::Binary => [0x02, 0x00, 0x00, 0x00, 0x00],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Header,
    Footer,
}

impl RecordKind {
    pub fn tag(&self) -> &'static [u8; 4] {
        match self {
            RecordKind::Header => b"HDR1",
            RecordKind::Footer => b"EOFD",
        }
    }
}

/// Upper-cases, then space-pads or truncates to eight bytes.
pub fn program_name(name: &str) -> [u8; NAME_LEN] {
    let mut out = [b' '; NAME_LEN];
    for (slot, byte) in out.iter_mut().zip(name.bytes()) {
        *slot = byte.to_ascii_uppercase();
    }
    out
}

/// The 80-byte file label carried by header and footer blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub kind: RecordKind,
    pub name: [u8; NAME_LEN],
    pub file_type: FileType,
    pub block_size: usize,
    pub date: String,
    pub time: String,
}

impl Record {
    pub fn new<C: Clock + ?Sized>(
        kind: RecordKind,
        name: &str,
        file_type: FileType,
        block_size: usize,
        clock: &C,
    ) -> Record {
        let (date, time) = clock.stamp();
        Record {
            kind,
            name: program_name(name),
            file_type,
            block_size,
            date,
            time,
        }
    }

    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut r = [b' '; RECORD_LEN];
        r[0..4].copy_from_slice(self.kind.tag());
        r[4..12].copy_from_slice(&self.name);
        r[15..20].copy_from_slice(&self.file_type.pattern());
        r[20] = WRITE_MODE_DOUBLE;
        r[21] = GAP_MODE_SHORT;
        put(&mut r[22..27], format!("{:>5}", self.block_size).as_bytes());
        put(&mut r[32..38], self.date.as_bytes());
        put(&mut r[38..44], self.time.as_bytes());
        r[50..52].copy_from_slice(VOLUME);
        r[52..60].copy_from_slice(SYSTEM_NAME);
        r
    }
}

/// Copies what fits; the rest stays space filled.
fn put(field: &mut [u8], value: &[u8]) {
    for (slot, byte) in field.iter_mut().zip(value) {
        *slot = *byte;
    }
}
