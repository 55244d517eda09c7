// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Round-trip integration tests for the in-memory encode/decode pipeline.

use lsbsteg_core::stego::frame::to_bits;
use lsbsteg_core::stego::lsb::{embed, embed_in_place, extract};
use lsbsteg_core::{capacity_bits, decode, encode, max_message_bytes, PixelGrid, StegoError};

/// Deterministic noisy cover so every LSB value occurs.
fn noisy_cover(width: u32, height: u32, channels: usize) -> PixelGrid {
    let mut state = 0x2545_F491u32;
    let data = (0..width as usize * height as usize * channels)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    PixelGrid::new(width, height, channels, data).unwrap()
}

#[test]
fn hi_in_1000_bit_grid() {
    // 334 px = 1002 bits of capacity.
    let mut grid = noisy_cover(334, 1, 3);
    assert!(capacity_bits(grid.pixel_count()) >= 1000);
    let original = grid.clone();

    let touched = embed_in_place(&mut grid, &to_bits(b"hi")).unwrap();
    assert_eq!(touched, 24);
    assert_eq!(&grid.as_raw()[24 * 3..], &original.as_raw()[24 * 3..]);
    assert_eq!(extract(&grid).unwrap(), b"hi");
}

#[test]
fn hi_with_password() {
    let cover = noisy_cover(40, 40, 3);
    let stego = encode(&cover, "hi", Some("secret")).unwrap();
    assert_eq!(decode(&stego, Some("secret")).unwrap(), "hi");
    assert!(matches!(decode(&stego, Some("wrong")), Err(StegoError::DecryptionFailed)));
}

#[test]
fn roundtrip_unicode() {
    let cover = noisy_cover(64, 64, 3);
    let message = "Héllo wörld! 日本語テスト 🔐";
    let stego = encode(&cover, message, None).unwrap();
    assert_eq!(decode(&stego, None).unwrap(), message);

    let stego = encode(&cover, message, Some("unicode-key")).unwrap();
    assert_eq!(decode(&stego, Some("unicode-key")).unwrap(), message);
}

#[test]
fn roundtrip_various_lengths() {
    let cover = noisy_cover(100, 100, 3);
    for len in [1, 10, 50, 100, 1000] {
        let message: String = (0..len).map(|i| (b'A' + (i % 26) as u8) as char).collect();
        let stego = encode(&cover, &message, None).unwrap();
        assert_eq!(decode(&stego, None).unwrap(), message, "failed for message length {len}");
    }
}

#[test]
fn empty_message_roundtrip() {
    let cover = noisy_cover(30, 30, 3);
    assert_eq!(decode(&encode(&cover, "", None).unwrap(), None).unwrap(), "");
    assert_eq!(decode(&encode(&cover, "", Some("pw")).unwrap(), Some("pw")).unwrap(), "");
}

#[test]
fn max_capacity_message_fits() {
    let cover = noisy_cover(50, 20, 3);
    let n = cover.pixel_count();

    let plain = "x".repeat(max_message_bytes(n, false).unwrap());
    let stego = encode(&cover, &plain, None).unwrap();
    assert_eq!(decode(&stego, None).unwrap(), plain);
    let over = "x".repeat(max_message_bytes(n, false).unwrap() + 1);
    assert!(matches!(encode(&cover, &over, None), Err(StegoError::CapacityExceeded { .. })));

    let secret = "y".repeat(max_message_bytes(n, true).unwrap());
    let stego = encode(&cover, &secret, Some("pw")).unwrap();
    assert_eq!(decode(&stego, Some("pw")).unwrap(), secret);
    let over = "y".repeat(max_message_bytes(n, true).unwrap() + 1);
    assert!(matches!(encode(&cover, &over, Some("pw")), Err(StegoError::CapacityExceeded { .. })));
}

#[test]
fn capacity_error_leaves_cover_intact() {
    let cover = noisy_cover(4, 4, 3);
    let before = cover.clone();
    let err = encode(&cover, "this is too long for sixteen pixels", None).unwrap_err();
    match err {
        StegoError::CapacityExceeded { available_bytes, required_bytes } => {
            assert_eq!(available_bytes, 6);
            assert_eq!(required_bytes, 35 + 7);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
    assert_eq!(cover, before);
}

#[test]
fn too_small_cover_reports_no_capacity() {
    // 16 px = 48 bits, short of the 56-bit marker.
    let cover = noisy_cover(4, 4, 3);
    assert_eq!(max_message_bytes(cover.pixel_count(), false), None);
    assert_eq!(max_message_bytes(cover.pixel_count(), true), None);
    assert!(matches!(
        encode(&cover, "", None),
        Err(StegoError::CapacityExceeded { available_bytes: 6, required_bytes: 7 })
    ));
    assert!(matches!(
        encode(&cover, "", Some("pw")),
        Err(StegoError::CapacityExceeded { available_bytes: 6, required_bytes: 71 })
    ));

    // 100 px holds a short plain message but not an empty envelope.
    let cover = noisy_cover(10, 10, 3);
    assert_eq!(max_message_bytes(cover.pixel_count(), false), Some(30));
    assert_eq!(max_message_bytes(cover.pixel_count(), true), None);
    assert!(encode(&cover, "", None).is_ok());
    assert!(matches!(encode(&cover, "", Some("pw")), Err(StegoError::CapacityExceeded { .. })));
}

#[test]
fn alpha_and_tail_untouched() {
    let cover = noisy_cover(32, 32, 4);
    let stego = encode(&cover, "alpha stays put", None).unwrap();

    let used = to_bits(b"alpha stays put").len().div_ceil(3);
    for (idx, (a, b)) in cover.pixels().zip(stego.pixels()).enumerate() {
        assert_eq!(a[3], b[3], "alpha changed in pixel {idx}");
        if idx >= used {
            assert_eq!(a, b, "pixel {idx} past the payload changed");
        } else {
            for c in 0..3 {
                assert_eq!(a[c] & !1, b[c] & !1, "high bits changed in pixel {idx}");
            }
        }
    }
    assert_eq!(decode(&stego, None).unwrap(), "alpha stays put");
}

#[test]
fn clean_cover_has_no_message() {
    let cover = PixelGrid::new(64, 64, 3, vec![128; 64 * 64 * 3]).unwrap();
    let err = decode(&cover, None).unwrap_err();
    assert!(err.is_no_message());
    assert!(matches!(decode(&cover, Some("pw")), Err(StegoError::NoHiddenMessage)));
}

#[test]
fn reembedding_replaces_previous_message() {
    let cover = noisy_cover(50, 50, 3);
    let first = embed(&cover, &to_bits(b"a much longer first message")).unwrap();
    let second = encode(&first, "short", None).unwrap();
    assert_eq!(decode(&second, None).unwrap(), "short");
}
