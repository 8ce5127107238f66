mod common;

use common::{decode_blocks, record, RawBlock};
use hx20::tape::{self, Crc16, FileType, TapeConfig};
use hx20::ErrorCode;
use std::io::Cursor;

fn verify_crc(block: &RawBlock, crc: Crc16) {
    let [hi, lo] = block.number.to_be_bytes();
    let mut checked = vec![block.kind, hi, lo, block.copy];
    checked.extend_from_slice(&block.payload);
    assert_eq!(crc.trailer(&checked), block.crc, "{} {}", block.kind, block.number);
}

#[test]
fn test_block_sequence() {
    let config = TapeConfig::default();
    let program = vec![b'A'; 300];
    let blocks = decode_blocks(&record(&config, &program), 80, 256);
    let ids: Vec<(u8, u16, u8)> = blocks.iter().map(|b| (b.kind, b.number, b.copy)).collect();
    assert_eq!(
        ids,
        vec![
            (b'H', 0, 0),
            (b'H', 0, 1),
            (b'D', 1, 0),
            (b'D', 1, 1),
            (b'D', 2, 0),
            (b'D', 2, 1),
            (b'E', 3, 0),
            (b'E', 3, 1),
        ]
    );
    for block in &blocks {
        assert_eq!(block.preamble, [0xFF, 0xAA]);
        assert_eq!(block.postamble, [0xAA, 0x00]);
        verify_crc(block, Crc16::Kermit);
    }
    for pair in blocks.chunks(2) {
        assert_eq!(pair[0].payload, pair[1].payload);
        assert_ne!(pair[0].copy, pair[1].copy);
    }
}

#[test]
fn test_ccitt_blocks() {
    let config = TapeConfig {
        crc: Crc16::Ccitt,
        ..TapeConfig::default()
    };
    let blocks = decode_blocks(&record(&config, b"10 END\r\n"), 80, 256);
    assert_eq!(blocks.len(), 6);
    for block in &blocks {
        verify_crc(block, Crc16::Ccitt);
    }
}

#[test]
fn test_data_chunks() {
    let config = TapeConfig::default();
    let program: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8 + 1).collect();
    let blocks = decode_blocks(&record(&config, &program), 80, 256);
    let data: Vec<&RawBlock> = blocks
        .iter()
        .filter(|b| b.kind == b'D' && b.copy == 0)
        .collect();
    assert_eq!(data.len(), 4);
    let mut joined = vec![];
    for block in &data {
        assert_eq!(block.payload.len(), 256);
        joined.extend_from_slice(&block.payload);
    }
    assert_eq!(&joined[..1000], &program[..]);
    assert!(joined[1000..].iter().all(|b| *b == 0));
    assert_eq!(blocks.last().unwrap().number, 5);
}

#[test]
fn test_exact_block_size() {
    let config = TapeConfig::default();
    let blocks = decode_blocks(&record(&config, &[b'Z'; 512]), 80, 256);
    assert_eq!(blocks.iter().filter(|b| b.kind == b'D').count(), 4);
}

#[test]
fn test_header_record() {
    let config = TapeConfig::default();
    let blocks = decode_blocks(&record(&config, b"10 END\r\n"), 80, 256);
    let header = &blocks[0].payload;
    assert_eq!(&header[0..4], b"HDR1");
    assert_eq!(&header[4..12], b"TEST    ");
    assert_eq!(&header[15..20], &[0x00, 0xFF, 0xFF, 0x00, 0x00]);
    assert_eq!(&header[20..27], b"2S  256");
    assert_eq!(&header[32..38], b"022984");
    assert_eq!(&header[38..44], b"123456");
    assert_eq!(&header[50..60], b"01HX-20   ");
    let footer = &blocks[blocks.len() - 1].payload;
    assert_eq!(&footer[0..4], b"EOFD");
    assert_eq!(&footer[4..], &header[4..]);
}

#[test]
fn test_tokenized_header() {
    let image = hx20::lang::tokenize(b"10 PRINT\n").unwrap();
    let file_type = FileType::detect(&image);
    assert_eq!(file_type, FileType::Tokenized);
    let mut bits: Vec<bool> = vec![];
    common::encoder(TapeConfig::default())
        .encode_into(&image, "prog", file_type, &mut bits)
        .unwrap();
    let blocks = decode_blocks(&bits, 80, 256);
    assert_eq!(&blocks[0].payload[4..12], b"PROG    ");
    assert_eq!(&blocks[0].payload[15..20], &[0x00; 5]);
    assert_eq!(&blocks[2].payload[..image.len()], &image[..]);
}

#[test]
fn test_bit_count() {
    let config = TapeConfig::default();
    let bits = record(&config, &[b'A'; 300]);
    let block = |payload: usize| 80 + 1 + (2 + 4 + payload + 2 + 2 + 100) * 9;
    let expected = 614 * 9 * 2
        + 2 * block(80)
        + 100 * 9
        + 4 * block(256)
        + 2 * 300 * 9
        + 2 * block(80);
    assert_eq!(bits.len(), expected);
}

#[test]
fn test_samples_follow_bits() {
    let config = TapeConfig::default();
    let program = b"10 PRINT \"HELLO\"\r\n";
    let bits = record(&config, program);
    let ones = bits.iter().filter(|b| **b).count();
    let zeros = bits.len() - ones;
    let samples = common::encoder(config)
        .encode(program, "TEST", FileType::Ascii)
        .unwrap();
    assert_eq!(samples.len(), zeros * 6 + ones * 10);
}

#[test]
fn test_empty_input() {
    let e = tape::encode_program(b"", "X", FileType::Ascii).unwrap_err();
    assert_eq!(e.code(), ErrorCode::EmptyInput);
}

#[test]
fn test_normalize() {
    let mut samples = common::encoder(TapeConfig::default())
        .encode(b"10 END\r\n", "X", FileType::Ascii)
        .unwrap();
    assert_eq!(samples.min_max(), Some((128, 129)));
    assert_eq!(tape::normalize(&mut samples, 95.0), Some(190.0));
    let (min, max) = samples.min_max().unwrap();
    assert_eq!((min, max), (33, 223));
    assert!((max - min) as f64 <= 2.0 * 95.0);
}

#[test]
fn test_wav_round_trip() {
    let samples = common::encoder(TapeConfig::default())
        .encode(b"10 END\r\n", "X", FileType::Ascii)
        .unwrap();
    let mut cursor = Cursor::new(Vec::new());
    tape::write_wav_to(&mut cursor, samples.as_slice(), 11025).unwrap();
    cursor.set_position(0);
    let mut reader = hound::WavReader::new(cursor).unwrap();
    assert_eq!(reader.spec().sample_rate, 11025);
    assert_eq!(reader.spec().bits_per_sample, 8);
    assert_eq!(reader.len() as usize, samples.len());
    let first: Vec<i8> = reader.samples::<i8>().take(4).map(|s| s.unwrap()).collect();
    let expected: Vec<i8> = samples.as_slice()[..4]
        .iter()
        .map(|s| (*s as i16 - 128) as i8)
        .collect();
    assert_eq!(first, expected);
}
