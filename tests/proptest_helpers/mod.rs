#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use framealign::align::{AlignedFrame, Aligner, AlignStats};
use framealign::frames::{FrameLocator, PathLoader};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A transcript record as written to the file.
#[derive(Clone, Debug, PartialEq)]
pub struct Rec {
    pub frame: u64,
    pub a: String,
    pub b: String,
}

/// One emitted frame reduced to what the properties compare.
pub type Row = (u64, String, String);

fn arb_label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9:]{0,8}"
}

/// Records with strictly increasing frame numbers in `1..=max_frame`.
pub fn arb_sparse_records(max_frame: u64, max_records: usize) -> BoxedStrategy<Vec<Rec>> {
    prop::collection::btree_set(1..=max_frame, 1..=max_records)
        .prop_flat_map(|frames| {
            let n = frames.len();
            (
                Just(frames),
                prop::collection::vec((arb_label(), arb_label()), n),
            )
        })
        .prop_map(|(frames, labels)| {
            frames
                .into_iter()
                .zip(labels)
                .map(|(frame, (a, b))| Rec { frame, a, b })
                .collect()
        })
        .boxed()
}

/// Lines the aligner must ignore.
pub fn arb_noise_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("\t".to_string()),
        Just("# comment".to_string()),
        Just("#1\tGhost\t00:00".to_string()),
        "#[a-z ]{0,10}",
    ]
}

/// A record line whose frame field may repeat, go backwards, be junk, or be
/// an image path.
pub fn arb_messy_line(max_frame: u64) -> impl Strategy<Value = String> {
    let frame_field = prop_oneof![
        4 => (0..=max_frame).prop_map(|n| n.to_string()),
        2 => (1..=max_frame).prop_map(|n| format!("image{n:03}.png")),
        1 => (1..=max_frame).prop_map(|n| format!("frames/image{n}.jpg")),
        1 => "[a-z]{1,6}",
    ];
    (frame_field, arb_label(), arb_label())
        .prop_map(|(frame, a, b)| format!("{frame}\t{a}\t{b}"))
}

/// A transcript mixing messy records with ignorable lines.
pub fn arb_messy_transcript(max_frame: u64, max_lines: usize) -> BoxedStrategy<String> {
    prop::collection::vec(
        prop_oneof![4 => arb_messy_line(max_frame), 1 => arb_noise_line()],
        0..=max_lines,
    )
    .prop_map(|lines| lines.into_iter().map(|line| line + "\n").collect())
    .boxed()
}

pub fn render(records: &[Rec]) -> String {
    records
        .iter()
        .map(|r| format!("{}\t{}\t{}\n", r.frame, r.a, r.b))
        .collect()
}

/// Renders `records` with `noise[i]` inserted before record `i` and any
/// leftover noise appended at the end.
pub fn render_with_noise(records: &[Rec], noise: &[Vec<String>]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        for line in noise.get(i).into_iter().flatten() {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("{}\t{}\t{}\n", record.frame, record.a, record.b));
    }
    for line in noise.iter().skip(records.len()).flatten() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn align_str(transcript: &str) -> (Vec<AlignedFrame<PathBuf>>, AlignStats) {
    let locator = FrameLocator::new("frames", "image%d.png").expect("valid pattern");
    let mut aligner = Aligner::new(Cursor::new(transcript.to_string()), locator, PathLoader);
    let frames = aligner
        .by_ref()
        .collect::<Result<Vec<_>, _>>()
        .expect("in-memory alignment cannot fail");
    (frames, aligner.stats().clone())
}

pub fn rows(frames: &[AlignedFrame<PathBuf>]) -> Vec<Row> {
    frames
        .iter()
        .map(|f| (f.index.as_u64(), f.labels.a.clone(), f.labels.b.clone()))
        .collect()
}

/// The labels frame `index` should carry: those of the last record at or
/// before it, or empty labels before the first record.
pub fn expected_labels(records: &[Rec], index: u64) -> (String, String) {
    records
        .iter()
        .take_while(|r| r.frame <= index)
        .last()
        .map(|r| (r.a.clone(), r.b.clone()))
        .unwrap_or_default()
}
