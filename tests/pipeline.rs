//! End-to-end runs over small corpora written to a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use joint_dropout::{run, Config, Error};
use tempfile::TempDir;

const SRC: &str = "the cat sat on the mat\nwe do not know\nhello\n";
const TRG: &str = "die Katze saß auf der Matte\nwir wissen nicht\nhallo\n";
const ALIGN: &str = "0-0 1-1 2-2 3-3 4-4 5-5\n0-0 1-1 2-2 3-1\n\n";
const VOCAB: &str = "the 10\ncat 9\nsat 8\non 7\nmat 6\nwe 5\ndo 5\nnot 5\nknow 5\nhello 4\n\
die 10\nKatze 9\nsaß 8\nauf 7\nder 6\nMatte 6\nwir 5\nwissen 5\nnicht 5\nhallo 4\n";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config(dir: &Path, align: &str, vardrop: f64) -> Config {
    let json = serde_json::json!({
        "src_file": write(dir, "train.en", SRC),
        "trg_file": write(dir, "train.de", TRG),
        "alignments_file": write(dir, "en-de.align", align),
        "bpe_vocab_file": write(dir, "vocab.bpe", VOCAB),
        "max_vocab": 100,
        "length": 3,
        "vardrop": vardrop,
        "output_src": dir.join("out.en"),
        "output_trg": dir.join("out.de"),
        "output_merged": dir.join("out.merged"),
    });
    Config::from_json(&json.to_string()).unwrap()
}

fn read(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_outputs_are_line_aligned() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), ALIGN, 1.0);

    let stats = run(&config).unwrap();
    assert_eq!(stats.pairs, 3);
    assert!(stats.changed >= 1);

    let src = read(&config.output_src);
    let trg = read(&config.output_trg);
    assert_eq!(src.len(), 3);
    assert_eq!(trg.len(), 3);

    // no alignment, no change
    assert_eq!(src[2], "hello");
    assert_eq!(trg[2], "hallo");

    for (s, t) in src.iter().zip(&trg) {
        let xs: Vec<&str> = s.split_whitespace().filter(|w| w.starts_with("X_")).collect();
        let ys: Vec<&str> = t.split_whitespace().filter(|w| w.starts_with("Y_")).collect();
        assert_eq!(xs.len(), ys.len());
        for x in xs {
            assert!(ys.contains(&format!("Y_{}", &x[2..]).as_str()));
        }
    }

    let merged = read(config.output_merged.as_ref().unwrap());
    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0], format!("{} ||| {}", src[0], trg[0]));
}

#[test]
fn test_same_seed_same_output() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = config(first.path(), ALIGN, 0.5);
    let b = config(second.path(), ALIGN, 0.5);

    run(&a).unwrap();
    run(&b).unwrap();

    assert_eq!(
        fs::read(&a.output_src).unwrap(),
        fs::read(&b.output_src).unwrap()
    );
    assert_eq!(
        fs::read(&a.output_trg).unwrap(),
        fs::read(&b.output_trg).unwrap()
    );
}

#[test]
fn test_vardrop_zero_copies_input() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), ALIGN, 0.0);

    let stats = run(&config).unwrap();
    assert_eq!(stats.changed, 0);
    assert_eq!(fs::read_to_string(&config.output_src).unwrap(), SRC);
    assert_eq!(fs::read_to_string(&config.output_trg).unwrap(), TRG);
}

#[test]
fn test_line_count_mismatch_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), "0-0\n0-0\n", 1.0);

    match run(&config) {
        Err(Error::LineCountMismatch { expected, found, path }) => {
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
            assert_eq!(path, config.alignments_file);
        }
        other => panic!("expected a line count mismatch, got {:?}", other),
    }
    assert!(!config.output_src.exists());
    assert!(!config.output_trg.exists());
}

#[test]
fn test_malformed_alignment_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), "0-0 1-1\n0-0 x-1\n\n", 1.0);

    let err = run(&config).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, Error::MalformedAlignment { line: 2, .. }));
    assert!(message.contains("en-de.align:2"), "{}", message);
    assert!(!config.output_src.exists());
}

#[test]
fn test_missing_input_names_the_file() {
    let dir = TempDir::new().unwrap();
    let mut config = config(dir.path(), ALIGN, 1.0);
    config.trg_file = dir.path().join("missing.de");

    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("missing.de"), "{}", err);
    match err {
        Error::Io { path, .. } => assert_eq!(path, config.trg_file),
        other => panic!("expected an I/O error, got {:?}", other),
    }
    assert!(!config.output_src.exists());
}
