use super::block::{write_block, write_gap, Block, BlockType};
use super::header::{Clock, FileType, Record, RecordKind, SystemClock, RECORD_LEN};
use super::{BitSink, PulseEncoder, Samples, TapeConfig};
use crate::error;
use crate::Error;
use log::info;

/// Encodes a program with the default configuration and the system clock.
pub fn encode_program(program: &[u8], name: &str, file_type: FileType) -> Result<Samples, Error> {
    TapeEncoder::new(TapeConfig::default()).encode(program, name, file_type)
}

/// Rewrites line endings to CR LF: lone LF gains a CR, lone CR is dropped.
pub fn crlf(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + text.len() / 16);
    for (i, &byte) in text.iter().enumerate() {
        match byte {
            b'\n' if i == 0 || text[i - 1] != b'\r' => out.extend_from_slice(b"\r\n"),
            b'\r' if text.get(i + 1) != Some(&b'\n') => {}
            _ => out.push(byte),
        }
    }
    out
}

/// A unit of the tape image, in recording order.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// This many 0xFF bytes.
    Gap(usize),
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutState {
    Init,
    Header(u8),
    HeaderGap,
    Data { number: u16, copy: u8 },
    DataGap { number: u16 },
    Footer(u8),
    TrailGap,
    Done,
}

/// Walks the tape image:
/// lead gap, header x2, gap, (data x2, gap)*, footer x2, trail gap.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    config: &'a TapeConfig,
    program: &'a [u8],
    header: [u8; RECORD_LEN],
    footer: [u8; RECORD_LEN],
    chunks: u16,
    state: LayoutState,
}

impl<'a> Layout<'a> {
    pub fn new<C: Clock + ?Sized>(
        config: &'a TapeConfig,
        program: &'a [u8],
        name: &str,
        file_type: FileType,
        clock: &C,
    ) -> Result<Layout<'a>, Error> {
        if program.is_empty() {
            return Err(error!(EmptyInput));
        }
        if config.block_size == 0 {
            return Err(error!(InternalError; "BLOCK SIZE IS ZERO"));
        }
        let chunks = (program.len() + config.block_size - 1) / config.block_size;
        // The footer takes the number after the last data block.
        if chunks >= u16::MAX as usize {
            return Err(error!(Overflow; format!("{} DATA BLOCKS", chunks)));
        }
        let record = |kind| Record::new(kind, name, file_type, config.block_size, clock).to_bytes();
        Ok(Layout {
            config,
            program,
            header: record(RecordKind::Header),
            footer: record(RecordKind::Footer),
            chunks: chunks as u16,
            state: LayoutState::Init,
        })
    }

    /// Number of data blocks, each written twice.
    pub fn chunks(&self) -> u16 {
        self.chunks
    }

    /// Chunk `number` (1-based), zero-padded to the block size.
    fn chunk(&self, number: u16) -> Vec<u8> {
        let size = self.config.block_size;
        let start = (number as usize - 1) * size;
        let end = (start + size).min(self.program.len());
        let mut chunk = vec![0x00; size];
        chunk[..end - start].copy_from_slice(&self.program[start..end]);
        chunk
    }

    fn block(kind: BlockType, number: u16, copy: u8, payload: Vec<u8>) -> Segment {
        Segment::Block(Block {
            kind,
            number,
            copy,
            payload,
        })
    }
}

impl<'a> Iterator for Layout<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        use LayoutState::*;
        let (state, segment) = match self.state {
            Init => (Header(0), Segment::Gap(self.config.file_gap)),
            Header(copy) => (
                if copy == 0 { Header(1) } else { HeaderGap },
                Self::block(BlockType::Header, 0, copy, self.header.to_vec()),
            ),
            HeaderGap => (
                if self.chunks > 0 {
                    Data { number: 1, copy: 0 }
                } else {
                    Footer(0)
                },
                Segment::Gap(self.config.header_gap),
            ),
            Data { number, copy } => (
                if copy == 0 {
                    Data { number, copy: 1 }
                } else {
                    DataGap { number }
                },
                Self::block(BlockType::Data, number, copy, self.chunk(number)),
            ),
            DataGap { number } => (
                if number < self.chunks {
                    Data {
                        number: number + 1,
                        copy: 0,
                    }
                } else {
                    Footer(0)
                },
                Segment::Gap(self.config.data_gap),
            ),
            Footer(copy) => (
                if copy == 0 { Footer(1) } else { TrailGap },
                Self::block(BlockType::End, self.chunks + 1, copy, self.footer.to_vec()),
            ),
            TrailGap => (Done, Segment::Gap(self.config.file_gap)),
            Done => return None,
        };
        self.state = state;
        Some(segment)
    }
}

/// Turns a program into a tape image.
#[derive(Debug, Clone)]
pub struct TapeEncoder<C = SystemClock> {
    config: TapeConfig,
    clock: C,
}

impl TapeEncoder<SystemClock> {
    pub fn new(config: TapeConfig) -> TapeEncoder<SystemClock> {
        TapeEncoder {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> TapeEncoder<C> {
    pub fn with_clock(config: TapeConfig, clock: C) -> TapeEncoder<C> {
        TapeEncoder { config, clock }
    }

    pub fn config(&self) -> &TapeConfig {
        &self.config
    }

    pub fn layout<'a>(
        &'a self,
        program: &'a [u8],
        name: &str,
        file_type: FileType,
    ) -> Result<Layout<'a>, Error> {
        Layout::new(&self.config, program, name, file_type, &self.clock)
    }

    /// Feeds the bit stream of the whole image into `sink`.
    pub fn encode_into<S: BitSink + ?Sized>(
        &self,
        program: &[u8],
        name: &str,
        file_type: FileType,
        sink: &mut S,
    ) -> Result<(), Error> {
        let layout = self.layout(program, name, file_type)?;
        info!(
            "encoding {} bytes as {} data blocks, {:?}",
            program.len(),
            layout.chunks(),
            file_type
        );
        for segment in layout {
            match segment {
                Segment::Gap(bytes) => write_gap(sink, bytes),
                Segment::Block(block) => write_block(sink, &block, &self.config),
            }
        }
        Ok(())
    }

    /// Renders the image as audio samples, not yet normalized.
    pub fn encode(&self, program: &[u8], name: &str, file_type: FileType) -> Result<Samples, Error> {
        let mut encoder = PulseEncoder::new(&self.config);
        self.encode_into(program, name, file_type, &mut encoder)?;
        Ok(encoder.into_samples())
    }
}
