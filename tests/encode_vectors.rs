use fixpack::{
    write_array_header, write_bin, write_bool, write_f32, write_map_header, write_nil, write_sint,
    write_str, write_uint, Buffer, ErrorCode, PackError,
};

fn encode_one(f: impl FnOnce(&mut Buffer<'_>) -> Result<(), PackError>) -> Vec<u8> {
    let mut storage = vec![0u8; 1 << 17];
    let mut buf = Buffer::new(&mut storage);
    f(&mut buf).unwrap();
    buf.written().to_vec()
}

#[test]
fn encode_nil_and_bool() {
    assert_eq!(encode_one(write_nil), vec![0xC0]);
    assert_eq!(encode_one(|b| write_bool(b, false)), vec![0xC2]);
    assert_eq!(encode_one(|b| write_bool(b, true)), vec![0xC3]);
}

#[test]
fn encode_uint_boundaries() {
    assert_eq!(encode_one(|b| write_uint(b, 0)), vec![0x00]);
    assert_eq!(encode_one(|b| write_uint(b, 1)), vec![0x01]);
    assert_eq!(encode_one(|b| write_uint(b, 0x7F)), vec![0x7F]);
    assert_eq!(encode_one(|b| write_uint(b, 0x80)), vec![0xCC, 0x80]);
    assert_eq!(encode_one(|b| write_uint(b, 0xFF)), vec![0xCC, 0xFF]);
    assert_eq!(encode_one(|b| write_uint(b, 0x100)), vec![0xCD, 0x01, 0x00]);
    assert_eq!(
        encode_one(|b| write_uint(b, 0xFFFF)),
        vec![0xCD, 0xFF, 0xFF]
    );
    assert_eq!(
        encode_one(|b| write_uint(b, 0x10000)),
        vec![0xCE, 0x00, 0x01, 0x00, 0x00]
    );
    assert_eq!(
        encode_one(|b| write_uint(b, 0xFFFF_FFFF)),
        vec![0xCE, 0xFF, 0xFF, 0xFF, 0xFF]
    );
    assert_eq!(
        encode_one(|b| write_uint(b, 0x1_0000_0000)),
        vec![0xCF, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
    );
    let mut expected = vec![0xCF];
    expected.extend_from_slice(&u64::MAX.to_be_bytes());
    assert_eq!(encode_one(|b| write_uint(b, u64::MAX)), expected);
}

#[test]
fn encode_sint_boundaries() {
    assert_eq!(encode_one(|b| write_sint(b, 0)), vec![0x00]);
    assert_eq!(encode_one(|b| write_sint(b, 0x7F)), vec![0x7F]);
    assert_eq!(encode_one(|b| write_sint(b, -1)), vec![0xFF]);
    assert_eq!(encode_one(|b| write_sint(b, -32)), vec![0xE0]);
    assert_eq!(encode_one(|b| write_sint(b, -33)), vec![0xD0, 0xDF]);
    assert_eq!(encode_one(|b| write_sint(b, -128)), vec![0xD0, 0x80]);
    assert_eq!(encode_one(|b| write_sint(b, -129)), vec![0xD1, 0xFF, 0x7F]);
    assert_eq!(encode_one(|b| write_sint(b, -32768)), vec![0xD1, 0x80, 0x00]);
    assert_eq!(
        encode_one(|b| write_sint(b, -32769)),
        vec![0xD2, 0xFF, 0xFF, 0x7F, 0xFF]
    );
    assert_eq!(
        encode_one(|b| write_sint(b, i64::from(i32::MIN))),
        vec![0xD2, 0x80, 0x00, 0x00, 0x00]
    );
    let mut expected = vec![0xD3];
    expected.extend_from_slice(&i64::MIN.to_be_bytes());
    assert_eq!(encode_one(|b| write_sint(b, i64::MIN)), expected);
    // Values above the fixint range still prefer the int8 form over wider ones.
    assert_eq!(encode_one(|b| write_sint(b, 0x80)), vec![0xD1, 0x00, 0x80]);
}

#[test]
fn encode_float32() {
    assert_eq!(
        encode_one(|b| write_f32(b, 1.5)),
        vec![0xCA, 0x3F, 0xC0, 0x00, 0x00]
    );
    assert_eq!(
        encode_one(|b| write_f32(b, -2.0)),
        vec![0xCA, 0xC0, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        encode_one(|b| write_f32(b, 0.0)),
        vec![0xCA, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn encode_str_len_boundaries() {
    for &len in &[0usize, 1, 31, 32, 255, 256, 65535, 65536] {
        let s = "a".repeat(len);
        let mut expected = Vec::new();
        if len <= 31 {
            expected.push(0xA0 | (len as u8));
        } else if len <= 0xFF {
            expected.push(0xD9);
            expected.push(len as u8);
        } else if len <= 0xFFFF {
            expected.push(0xDA);
            expected.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            expected.push(0xDB);
            expected.extend_from_slice(&(len as u32).to_be_bytes());
        }
        expected.extend_from_slice(s.as_bytes());
        assert_eq!(encode_one(|b| write_str(b, &s)), expected, "len {len}");
    }
}

#[test]
fn encode_bin_len_boundaries() {
    for &len in &[0usize, 1, 255, 256, 65535, 65536] {
        let data = vec![0x5Au8; len];
        let mut expected = Vec::new();
        if len <= 0xFF {
            expected.push(0xC4);
            expected.push(len as u8);
        } else if len <= 0xFFFF {
            expected.push(0xC5);
            expected.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            expected.push(0xC6);
            expected.extend_from_slice(&(len as u32).to_be_bytes());
        }
        expected.extend_from_slice(&data);
        assert_eq!(encode_one(|b| write_bin(b, &data)), expected, "len {len}");
    }
}

#[test]
fn encode_container_header_boundaries() {
    assert_eq!(encode_one(|b| write_array_header(b, 0)), vec![0x90]);
    assert_eq!(encode_one(|b| write_array_header(b, 15)), vec![0x9F]);
    assert_eq!(
        encode_one(|b| write_array_header(b, 16)),
        vec![0xDC, 0x00, 0x10]
    );
    assert_eq!(
        encode_one(|b| write_array_header(b, 0xFFFF)),
        vec![0xDC, 0xFF, 0xFF]
    );
    assert_eq!(
        encode_one(|b| write_array_header(b, 0x10000)),
        vec![0xDD, 0x00, 0x01, 0x00, 0x00]
    );

    assert_eq!(encode_one(|b| write_map_header(b, 0)), vec![0x80]);
    assert_eq!(encode_one(|b| write_map_header(b, 15)), vec![0x8F]);
    assert_eq!(
        encode_one(|b| write_map_header(b, 16)),
        vec![0xDE, 0x00, 0x10]
    );
    assert_eq!(
        encode_one(|b| write_map_header(b, 0x10000)),
        vec![0xDF, 0x00, 0x01, 0x00, 0x00]
    );
}

// Sixteen elements force the array16 header; the elements are fixints.
#[test]
fn encode_array_of_sixteen_uints() {
    let bytes = encode_one(|b| {
        write_array_header(b, 16)?;
        for i in 0..16 {
            write_uint(b, i)?;
        }
        Ok(())
    });
    let mut expected = vec![0xDC, 0x00, 0x10];
    expected.extend(0..16u8);
    assert_eq!(bytes, expected);
}

#[test]
fn encode_small_map_document() {
    let bytes = encode_one(|b| {
        write_map_header(b, 2)?;
        write_sint(b, 0)?;
        write_sint(b, 0)?;
        write_uint(b, 1)?;
        write_uint(b, 1)?;
        Ok(())
    });
    assert_eq!(bytes, vec![0x82, 0x00, 0x00, 0x01, 0x01]);
}

#[test]
fn scalar_write_is_all_or_nothing() {
    let mut storage = [0u8; 2];
    let mut buf = Buffer::new(&mut storage);
    // 0x100 needs three bytes; the two-byte buffer must stay untouched.
    let err = write_uint(&mut buf, 0x100).unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientCapacity);
    assert_eq!(buf.position(), 0);
    assert!(buf.written().is_empty());
}

#[test]
fn str_write_is_all_or_nothing() {
    let mut storage = [0u8; 3];
    let mut buf = Buffer::new(&mut storage);
    // "hello" needs six bytes with its fixstr header; not even the header
    // may land.
    let err = write_str(&mut buf, "hello").unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientCapacity);
    assert_eq!(buf.position(), 0);
    assert!(buf.written().is_empty());
}
