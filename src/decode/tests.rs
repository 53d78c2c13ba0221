// src/decode/tests.rs

use crate::decode::context::CodecContext;
use crate::decode::decoder::{decode_symbols, decode_symbols_with_offsets, decode_verified};
use crate::decode::lookup::{LookupEntry, SymbolLookup};
use crate::encode::encoder::HuffmanEncoder;
use crate::utils::error::HuffmanError;

fn header_with(entries: &[(usize, u8)]) -> [u8; 256] {
    let mut widths = [0u8; 256];
    for &(symbol, width) in entries {
        widths[symbol] = width;
    }
    widths
}

#[test]
fn test_context_rejects_kraft_violation() {
    // 2^-1 + 2^-2 = 0.75, not a complete code
    let header = header_with(&[(0, 1), (1, 2)]);
    assert!(matches!(
        CodecContext::from_canonical_header(&header),
        Err(HuffmanError::HeaderCorruption(_))
    ));
}

#[test]
fn test_context_rejects_oversized_width() {
    let header = header_with(&[(0, 17), (1, 1)]);
    assert!(matches!(
        CodecContext::from_canonical_header(&header),
        Err(HuffmanError::HeaderCorruption(_))
    ));
}

#[test]
fn test_context_rejects_empty_header() {
    let header = [0u8; 256];
    assert!(matches!(
        CodecContext::from_canonical_header(&header),
        Err(HuffmanError::HeaderCorruption(_))
    ));
}

#[test]
fn test_context_rejects_wide_singleton() {
    let header = header_with(&[(9, 2)]);
    assert!(CodecContext::from_canonical_header(&header).is_err());
}

#[test]
fn test_full_table_covers_every_window() {
    let header = header_with(&[(0, 1), (1, 2), (2, 3), (3, 3)]);
    let ctx = CodecContext::from_canonical_header(&header).unwrap();
    let table = ctx.build_lookup_table().unwrap();
    assert_eq!(table.len(), 1 << 16);

    // A window's leading bits pick the symbol regardless of the tail.
    assert_eq!(table.resolve(0x0000).symbol, 0);
    assert_eq!(table.resolve(0x7FFF).symbol, 0);
    assert_eq!(table.resolve(0x8000).symbol, 1);
    assert_eq!(table.resolve(0xBFFF).symbol, 1);
    assert_eq!(table.resolve(0xC000), LookupEntry { symbol: 2, bit_width: 3 });
    assert_eq!(table.resolve(0xE123).symbol, 3);
}

#[test]
fn test_split_tables_group_wide_codes() {
    // Widths 1, 2, 3, 3 with a 2/14 split: symbols 2 and 3 share the
    // high prefix 11 and land in one secondary block.
    let header = header_with(&[(0, 1), (1, 2), (2, 3), (3, 3)]);
    let ctx = CodecContext::from_canonical_header(&header).unwrap();
    let tables = ctx.build_split_tables(2, 14).unwrap();

    assert_eq!(tables.probe_table1(0x0000), LookupEntry { symbol: 0, bit_width: 1 });
    assert_eq!(tables.probe_table1(0x4000), LookupEntry { symbol: 0, bit_width: 1 });
    assert_eq!(tables.probe_table1(0x8000), LookupEntry { symbol: 1, bit_width: 2 });
    // Unresolved prefix slot forwards to secondary block 1.
    assert_eq!(tables.probe_table1(0xC000), LookupEntry { symbol: 1, bit_width: 0 });

    assert_eq!(tables.resolve(0xC000), LookupEntry { symbol: 2, bit_width: 3 });
    assert_eq!(tables.resolve(0xDFFF), LookupEntry { symbol: 2, bit_width: 3 });
    assert_eq!(tables.resolve(0xE000), LookupEntry { symbol: 3, bit_width: 3 });
    assert_eq!(tables.resolve(0xFFFF), LookupEntry { symbol: 3, bit_width: 3 });

    // Sentinel block 0 stays all zero.
    let sentinel = &tables.table2_bytes()[..2 << 14];
    assert!(sentinel.iter().all(|&b| b == 0));
}

#[test]
fn test_split_rejects_bad_partition() {
    let header = header_with(&[(0, 1), (1, 1)]);
    let ctx = CodecContext::from_canonical_header(&header).unwrap();
    assert!(ctx.build_split_tables(9, 8).is_err());
    assert!(ctx.build_split_tables(0, 16).is_err());
    assert!(ctx.build_split_tables(16, 0).is_err());
}

#[test]
fn test_table_modes_agree() {
    let data = b"split and full tables must decode identically";
    let stream = HuffmanEncoder::encode(data).unwrap();
    let ctx = CodecContext::from_canonical_header(stream.canonical_header()).unwrap();

    let full = ctx.build_lookup_table().unwrap();
    let expected = decode_symbols(&full, data.len(), stream.code_bytes(), 0).unwrap();
    assert_eq!(expected, data);

    for (t1, t2) in [(4, 12), (8, 8), (9, 7), (12, 4)] {
        let split = ctx.build_split_tables(t1, t2).unwrap();
        let got = decode_symbols(&split, data.len(), stream.code_bytes(), 0).unwrap();
        assert_eq!(got, expected, "{}-bit/{}-bit split disagrees", t1, t2);
    }
}

#[test]
fn test_decode_records_bit_offsets() {
    let stream = HuffmanEncoder::encode(&[0, 0, 0, 1]).unwrap();
    let ctx = CodecContext::from_canonical_header(stream.canonical_header()).unwrap();
    let table = ctx.build_lookup_table().unwrap();

    let (decoded, offsets) =
        decode_symbols_with_offsets(&table, 4, stream.code_bytes(), 0).unwrap();
    assert_eq!(decoded, vec![0, 0, 0, 1]);
    assert_eq!(offsets, stream.symbol_bit_offsets());
}

#[test]
fn test_unresolved_window_aborts_decode() {
    // Degenerate header: only the "0" code exists, so a stream starting
    // with a 1 bit hits an unpopulated slot.
    let header = header_with(&[(7, 1)]);
    let ctx = CodecContext::from_canonical_header(&header).unwrap();
    let table = ctx.build_lookup_table().unwrap();
    let err = decode_symbols(&table, 1, &[0b1000_0000, 0, 0], 0).unwrap_err();
    assert!(matches!(err, HuffmanError::Decode(_)));

    let tables = ctx.build_split_tables(9, 7).unwrap();
    let err = decode_symbols(&tables, 1, &[0b1000_0000, 0, 0], 0).unwrap_err();
    assert!(matches!(err, HuffmanError::Decode(_)));
}

#[test]
fn test_truncated_stream_aborts_decode() {
    let header = header_with(&[(0, 1), (1, 1)]);
    let ctx = CodecContext::from_canonical_header(&header).unwrap();
    let table = ctx.build_lookup_table().unwrap();
    // Two bytes cannot satisfy a 3-byte window gather.
    assert!(decode_symbols(&table, 1, &[0, 0], 0).is_err());
}

#[test]
fn test_verified_decode_reports_mismatches() {
    let data = [0u8, 0, 0, 1];
    let stream = HuffmanEncoder::encode(&data).unwrap();
    let ctx = CodecContext::from_canonical_header(stream.canonical_header()).unwrap();
    let table = ctx.build_lookup_table().unwrap();

    let clean = decode_verified(&table, stream.code_bytes(), &data).unwrap();
    assert!(clean.is_match());
    assert_eq!(clean.decoded, data);

    let altered = [0u8, 0, 1, 1];
    let report = decode_verified(&table, stream.code_bytes(), &altered).unwrap();
    assert!(!report.is_match());
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].index, 2);
    assert_eq!(report.mismatches[0].expected, 1);
    assert_eq!(report.mismatches[0].actual, 0);
}

#[test]
fn test_degenerate_header_decodes_any_length() {
    let data = [9u8; 50];
    let stream = HuffmanEncoder::encode(&data).unwrap();
    let ctx = CodecContext::from_canonical_header(stream.canonical_header()).unwrap();

    let table = ctx.build_lookup_table().unwrap();
    assert_eq!(
        decode_symbols(&table, 50, stream.code_bytes(), 0).unwrap(),
        data
    );

    let split = ctx.build_split_tables(9, 7).unwrap();
    assert_eq!(
        decode_symbols(&split, 50, stream.code_bytes(), 0).unwrap(),
        data
    );
}
