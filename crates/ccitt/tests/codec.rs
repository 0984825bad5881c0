use ccitt_t4_t6::{
    bits::BitWriter,
    decode, encode, g3,
    tables::{EOL, EOL1},
    CodecConfig, Color, FaxError, FillOrder, PixelValues,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A bitmap made of random runs, so that all coding modes show up
fn random_bitmap(rng: &mut StdRng, columns: usize, rows: usize, pixels: PixelValues) -> Vec<Vec<u8>> {
    let mut bitmap: Vec<Vec<u8>> = Vec::with_capacity(rows);
    for _ in 0..rows {
        let row = match bitmap.last() {
            // mostly small changes against the previous row
            Some(prev) if rng.random_bool(0.7) => {
                let mut row = prev.clone();
                for _ in 0..rng.random_range(0..4) {
                    let start = rng.random_range(0..columns);
                    let end = (start + rng.random_range(1..6)).min(columns);
                    let color = Color::from(rng.random_bool(0.5));
                    row[start..end].fill(pixels.value(color));
                }
                row
            }
            _ => {
                let mut row = Vec::with_capacity(columns);
                let mut color = Color::from(rng.random_bool(0.5));
                while row.len() < columns {
                    let len = if rng.random_bool(0.1) {
                        rng.random_range(64..3000)
                    } else {
                        rng.random_range(1..20)
                    };
                    let len = len.min(columns - row.len());
                    row.resize(row.len() + len, pixels.value(color));
                    color.invert();
                }
                row
            }
        };
        bitmap.push(row);
    }
    bitmap
}

#[test]
fn roundtrip_all_schemes() {
    let mut rng = StdRng::seed_from_u64(0x7ea4);
    for k in [0, 1, 2, 4, -1] {
        for end_of_line in [false, true] {
            for encoded_byte_align in [false, true] {
                for black_is_1 in [false, true] {
                    for columns in [1, 13, 1728] {
                        let mut config = CodecConfig::new(columns).with_k(k);
                        config.end_of_line = end_of_line;
                        config.encoded_byte_align = encoded_byte_align;
                        config.black_is_1 = black_is_1;
                        config.end_of_block = rng.random_bool(0.5);

                        let bitmap = random_bitmap(&mut rng, columns, 12, config.pixels());
                        let data = encode(&bitmap, &config).unwrap();
                        let decoded = decode(&data, &config).unwrap();
                        assert_eq!(decoded, bitmap, "{:?}", config);
                    }
                }
            }
        }
    }
}

#[test]
fn roundtrip_with_rows() {
    let mut rng = StdRng::seed_from_u64(17);
    for k in [0, 3, -1] {
        let mut config = CodecConfig::new(100).with_k(k);
        config.rows = 7;
        let bitmap = random_bitmap(&mut rng, 100, 10, config.pixels());
        let data = encode(&bitmap, &config).unwrap();
        assert_eq!(decode(&data, &config).unwrap(), &bitmap[..7]);
    }
}

#[test]
fn single_run_rows() {
    for k in [0, 2, -1] {
        for columns in [1, 63, 64, 1728, 2560, 2561, 6000] {
            let config = CodecConfig::new(columns).with_k(k);
            let bitmap = vec![vec![1u8; columns], vec![0u8; columns], vec![1u8; columns]];
            let data = encode(&bitmap, &config).unwrap();
            assert_eq!(decode(&data, &config).unwrap(), bitmap, "K={} columns={}", k, columns);
        }
    }
}

#[test]
fn golden_g4_vector() {
    let mut config = CodecConfig::new(8).with_k(-1);
    let row = vec![1u8, 1, 1, 1, 1, 1, 1, 0];

    // VL1, V0, EOFB
    let data = encode(&[&row], &config).unwrap();
    assert_eq!(data, [0x50, 0x01, 0x00, 0x10]);
    assert_eq!(decode(&data, &config).unwrap(), vec![row.clone()]);

    config.end_of_block = false;
    let data = encode(&[&row], &config).unwrap();
    assert_eq!(data, [0x50]);
    assert_eq!(decode(&data, &config).unwrap(), vec![row]);
}

#[test]
fn black_is_1() {
    let mut config = CodecConfig::new(8).with_k(-1);
    config.black_is_1 = true;
    // everything that is not 1 is white
    let data = encode(&[[0u8, 0, 7, 0, 255, 0, 0, 1]], &config).unwrap();
    assert_eq!(data, [0x50, 0x01, 0x00, 0x10]);
    assert_eq!(decode(&data, &config).unwrap(), vec![vec![0u8, 0, 0, 0, 0, 0, 0, 1]]);
}

#[test]
fn lsb_first() {
    let mut config = CodecConfig::new(8).with_k(-1);
    config.fill_order = FillOrder::LsbToMsb;
    let row = [1u8, 1, 1, 1, 1, 1, 1, 0];
    let data = encode(&[row], &config).unwrap();
    assert_eq!(data, [0x0A, 0x80, 0x00, 0x08]);
    assert_eq!(decode(&data, &config).unwrap(), vec![row.to_vec()]);
}

#[test]
fn byte_alignment() {
    // each all-white row is a single V0 bit
    let mut config = CodecConfig::new(16).with_k(-1);
    config.end_of_block = false;
    let bitmap = vec![vec![1u8; 16]; 8];

    let packed = encode(&bitmap, &config).unwrap();
    assert_eq!(packed, [0xFF]);

    config.encoded_byte_align = true;
    let aligned = encode(&bitmap, &config).unwrap();
    assert_eq!(aligned, [0x80; 8]);
    assert_eq!(decode(&aligned, &config).unwrap(), bitmap);
}

#[test]
fn terminators() {
    let bitmap = vec![vec![1u8; 4], vec![0u8; 4]];
    for (k, trailer_bytes) in [(0, 9), (-1, 3)] {
        let config = CodecConfig::new(4).with_k(k);
        let data = encode(&bitmap, &config).unwrap();
        assert!(data.len() >= trailer_bytes);
        assert_eq!(decode(&data, &config).unwrap(), bitmap);
    }

    // a terminator with nothing before it
    let mut writer = BitWriter::new();
    writer.write_eols(EOL, 6);
    let config = CodecConfig::new(4);
    assert_eq!(decode(&writer.done(), &config).unwrap(), Vec::<Vec<u8>>::new());

    let mut writer = BitWriter::new();
    writer.write_eols(EOL, 2);
    let config = CodecConfig::new(4).with_k(-1);
    assert_eq!(decode(&writer.done(), &config).unwrap(), Vec::<Vec<u8>>::new());

    let mut writer = BitWriter::new();
    writer.write_eols(EOL1, 6);
    let config = CodecConfig::new(4).with_k(2);
    assert_eq!(decode(&writer.done(), &config).unwrap(), Vec::<Vec<u8>>::new());
}

#[test]
fn corrupt_rtc() {
    // white 4 = 1011
    let mut writer = BitWriter::new();
    writer.write_bits(0b1011, 4);
    writer.write_eols(EOL, 5);
    writer.write_bits(0b1011, 4);
    let config = CodecConfig::new(4);
    assert_eq!(
        decode(&writer.done(), &config),
        Err(FaxError::RtcCorrupt { eols: 5 })
    );
}

/// One white row of 4 (`1011`, tagged in 2D mode), `eols` EOL codes, and another row if `tail`
fn short_rtc_stream(k: i32, eols: usize, tail: bool) -> Vec<u8> {
    let mut writer = BitWriter::new();
    let eol = if k > 0 {
        writer.write(true);
        EOL1
    } else {
        EOL
    };
    writer.write_bits(0b1011, 4);
    writer.write_eols(eol, eols);
    if tail {
        if k > 0 {
            writer.write(true);
        }
        writer.write_bits(0b1011, 4);
    }
    writer.done()
}

#[test]
fn short_rtc_at_end_of_data() {
    for k in [0, 2] {
        let config = CodecConfig::new(4).with_k(k);
        for eols in 2..=5 {
            let data = short_rtc_stream(k, eols, false);
            assert_eq!(
                decode(&data, &config),
                Ok(vec![vec![1u8; 4]]),
                "K={} EOLs={}",
                k,
                eols
            );
        }
    }
}

#[test]
fn short_rtc_before_data() {
    for k in [0, 2] {
        let config = CodecConfig::new(4).with_k(k);
        let data = short_rtc_stream(k, 3, true);
        assert_eq!(
            decode(&data, &config),
            Err(FaxError::RtcCorrupt { eols: 3 }),
            "K={}",
            k
        );
    }
}

#[test]
fn fill_bits_before_eol() {
    let mut writer = BitWriter::new();
    writer.write_bits(0, 5);
    writer.write_code(EOL);
    writer.write_bits(0b1011, 4);
    writer.write_bits(0, 3);
    writer.write_code(EOL);
    g3::encode_row(&mut writer, &[Color::Black; 4]);
    writer.write_eols(EOL, 6);

    let mut config = CodecConfig::new(4);
    config.end_of_line = true;
    assert_eq!(
        decode(&writer.done(), &config).unwrap(),
        vec![vec![1u8; 4], vec![0u8; 4]]
    );
}

#[test]
fn missing_eol() {
    let config = CodecConfig::new(4);
    let data = encode(&[[1u8; 4]], &config).unwrap();

    let mut strict = config;
    strict.end_of_line = true;
    assert_eq!(decode(&data, &strict), Err(FaxError::MissingEol { row: 0 }));
}

/// EOL, white row, EOL, `damaged` bad rows each followed by an EOL, black row, RTC
fn damaged_stream(damaged: usize) -> Vec<u8> {
    let mut writer = BitWriter::new();
    writer.write_code(EOL);
    g3::encode_row(&mut writer, &[Color::White; 8]);
    for _ in 0..damaged {
        writer.write_code(EOL);
        // 8 zeros do not start any white code
        writer.write_bits(0b0000_0000_1111_1, 13);
    }
    writer.write_code(EOL);
    g3::encode_row(&mut writer, &[Color::Black; 8]);
    writer.write_eols(EOL, 6);
    writer.done()
}

#[test]
fn damaged_rows() {
    let mut config = CodecConfig::new(8);
    config.end_of_line = true;

    let data = damaged_stream(1);
    // EOL + white 8 (10011) + EOL
    assert_eq!(
        decode(&data, &config),
        Err(FaxError::InvalidRunCode {
            color: Color::White,
            bit_pos: 29
        })
    );

    config.damaged_rows_before_error = 1;
    assert_eq!(
        decode(&data, &config).unwrap(),
        vec![vec![1u8; 8], vec![1u8; 8], vec![0u8; 8]]
    );

    let data = damaged_stream(2);
    assert!(matches!(
        decode(&data, &config),
        Err(FaxError::InvalidRunCode { .. })
    ));

    config.damaged_rows_before_error = 2;
    assert_eq!(decode(&data, &config).unwrap().len(), 4);
}

#[test]
fn damaged_rows_g4_is_strict() {
    let mut config = CodecConfig::new(8).with_k(-1);
    config.end_of_line = true;
    config.damaged_rows_before_error = 5;
    assert!(decode(&[0x00, 0x00, 0xFF], &config).is_err());
}

#[test]
fn invalid_input() {
    let config = CodecConfig::new(0);
    assert_eq!(encode(&[[0u8; 0]], &config), Err(FaxError::InvalidColumns));
    assert_eq!(decode(&[], &config), Err(FaxError::InvalidColumns));

    let config = CodecConfig::new(8);
    assert_eq!(
        encode(&[[0u8; 4]], &config),
        Err(FaxError::RowLength {
            row: 0,
            len: 4,
            columns: 8
        })
    );
    assert_eq!(decode(&[], &config), Ok(vec![]));
}

#[test]
fn rows_bound_output() {
    // every 1 bit is a V0 row
    let data = [0xFF; 4];
    let mut config = CodecConfig::new(1728).with_k(-1);
    assert_eq!(decode(&data, &config).unwrap().len(), 32);

    config.rows = 5;
    let rows = decode(&data, &config).unwrap();
    assert_eq!(rows, vec![vec![1u8; 1728]; 5]);
}
