//! Integration tests for DPX reading and frame discovery.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::fs;

use hdr_nits_adapters::{read_descriptor, read_pixels, FsFrameSource};
use hdr_nits_core::{BatchDriver, ByteOrder, FrameError, FrameSource};
use hdr_nits_test_support::{DpxFileBuilder, SyntheticFrameBuilder};

#[test]
fn test_read_big_endian_dpx() {
    let dir = tempfile::tempdir().unwrap();
    let frame = SyntheticFrameBuilder::uniform("a.dpx", 3, 4, 512);
    DpxFileBuilder::write(dir.path(), &frame).unwrap();

    let path = dir.path().join("a.dpx");
    let descriptor = read_descriptor(&path).expect("should read header");
    assert_eq!(descriptor, frame.descriptor);

    let pixels = read_pixels(&path, &descriptor).expect("should read payload");
    assert_eq!(pixels, frame.pixels);
}

#[test]
fn test_read_little_endian_dpx() {
    let dir = tempfile::tempdir().unwrap();
    let frame = SyntheticFrameBuilder::spot("le.dpx", 2, 2, 1023).little_endian();
    DpxFileBuilder::write(dir.path(), &frame).unwrap();

    let path = dir.path().join("le.dpx");
    let descriptor = read_descriptor(&path).unwrap();
    assert_eq!(descriptor.byte_order, ByteOrder::Little);
    assert_eq!(descriptor.width, 2);
    assert_eq!(descriptor.rows, 2);
    assert_eq!(descriptor.packing, 1);
    assert_eq!(read_pixels(&path, &descriptor).unwrap(), frame.pixels);
}

#[test]
fn test_short_header_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.dpx");
    fs::write(&path, b"SDPX\0\0\x08\0").unwrap();

    assert!(matches!(
        read_descriptor(&path),
        Err(FrameError::MalformedContainer { .. })
    ));
}

#[test]
fn test_truncated_payload_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let frame = SyntheticFrameBuilder::uniform("a.dpx", 4, 4, 100);
    let mut bytes = DpxFileBuilder::to_bytes(&frame);
    bytes.truncate(bytes.len() - 10);
    let path = dir.path().join("a.dpx");
    fs::write(&path, bytes).unwrap();

    let descriptor = read_descriptor(&path).unwrap();
    assert!(matches!(
        read_pixels(&path, &descriptor),
        Err(FrameError::MalformedContainer { .. })
    ));
}

#[test]
fn test_oversized_dimensions_are_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let mut frame = SyntheticFrameBuilder::uniform("huge.dpx", 1, 1, 512);
    frame.descriptor.rows = 0x7FFF_FFFF;
    frame.descriptor.width = 0x7FFF_FFFF;
    DpxFileBuilder::write(dir.path(), &frame).unwrap();

    let path = dir.path().join("huge.dpx");
    let descriptor = read_descriptor(&path).unwrap();
    assert_eq!(descriptor.rows, 0x7FFF_FFFF);

    match read_pixels(&path, &descriptor) {
        Err(FrameError::MalformedContainer { reason }) => {
            assert!(reason.contains("truncated"), "unexpected reason: {reason}");
        }
        other => panic!("expected a malformed container, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_descriptor(&dir.path().join("missing.dpx")),
        Err(FrameError::Io(_))
    ));
}

#[test]
fn test_source_lists_sorted_frames() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c.dpx", "a.DPX", "b.dpx"] {
        let frame = SyntheticFrameBuilder::uniform(name, 1, 1, 0);
        DpxFileBuilder::write(dir.path(), &frame).unwrap();
    }
    fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    DpxFileBuilder::write(
        &dir.path().join("sub"),
        &SyntheticFrameBuilder::uniform("d.dpx", 1, 1, 0),
    )
    .unwrap();

    let source = FsFrameSource::new(dir.path(), false);
    let frames: Vec<String> = source.frames().map(Result::unwrap).collect();
    assert_eq!(frames, vec!["a.DPX", "b.dpx", "c.dpx"]);
    assert_eq!(source.count_hint(), Some(3));

    let recursive = FsFrameSource::new(dir.path(), true);
    assert_eq!(recursive.frames().count(), 4);
}

#[test]
fn test_missing_directory_yields_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FsFrameSource::new(dir.path().join("nope"), false);

    let items: Vec<_> = source.frames().collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(FrameError::Io(_))));
    assert_eq!(source.count_hint(), None);
}

#[test]
fn test_batch_over_directory() {
    let dir = tempfile::tempdir().unwrap();
    DpxFileBuilder::write_all(
        dir.path(),
        &[
            SyntheticFrameBuilder::uniform("frame_001.dpx", 2, 2, 0),
            SyntheticFrameBuilder::spot("frame_002.dpx", 4, 4, 1023),
            SyntheticFrameBuilder::uniform("frame_003.dpx", 2, 2, 800).little_endian(),
        ],
    )
    .unwrap();

    let source = FsFrameSource::new(dir.path(), false);
    let stats = BatchDriver::new(&source).run().expect("batch should succeed");

    assert_eq!(stats.frames_processed, 3);
    assert_eq!(stats.global_peak, 10_000.0);
    assert_eq!(stats.global_peak_frame.as_deref(), Some("frame_002.dpx"));
    assert_eq!(stats.global_mean_peak_frame.as_deref(), Some("frame_003.dpx"));
}

#[test]
fn test_batch_aborts_on_legal_range_file() {
    let dir = tempfile::tempdir().unwrap();
    DpxFileBuilder::write_all(
        dir.path(),
        &[
            SyntheticFrameBuilder::uniform("a.dpx", 1, 1, 0),
            SyntheticFrameBuilder::uniform("b.dpx", 1, 1, 0).with_reference_range(64, 940),
            SyntheticFrameBuilder::uniform("c.dpx", 1, 1, 0),
        ],
    )
    .unwrap();

    let source = FsFrameSource::new(dir.path(), false);
    let err = BatchDriver::new(&source).run().unwrap_err();

    assert_eq!(err.frame, "b.dpx");
    assert!(matches!(err.source, FrameError::UnsupportedEncoding { .. }));
}

#[cfg(target_os = "linux")]
#[test]
fn test_batch_reads_non_utf8_file_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let frame = SyntheticFrameBuilder::spot("unused", 2, 2, 1023);
    fs::write(
        dir.path().join(OsStr::from_bytes(b"shot_\xff.dpx")),
        DpxFileBuilder::to_bytes(&frame),
    )
    .unwrap();

    let source = FsFrameSource::new(dir.path(), false);
    let stats = BatchDriver::new(&source).run().expect("batch should succeed");

    assert_eq!(stats.frames_processed, 1);
    assert_eq!(stats.global_peak, 10_000.0);
    assert_eq!(stats.global_peak_frame.as_deref(), Some("shot_\\xff.dpx"));
}

#[test]
fn test_listing_is_scanned_once() {
    let dir = tempfile::tempdir().unwrap();
    DpxFileBuilder::write(dir.path(), &SyntheticFrameBuilder::uniform("a.dpx", 1, 1, 0)).unwrap();

    let source = FsFrameSource::new(dir.path(), false);
    assert_eq!(source.count_hint(), Some(1));

    DpxFileBuilder::write(dir.path(), &SyntheticFrameBuilder::uniform("b.dpx", 1, 1, 0)).unwrap();

    let frames: Vec<String> = source.frames().map(Result::unwrap).collect();
    assert_eq!(frames, vec!["a.dpx"]);
    assert_eq!(source.count_hint(), Some(1));
}
