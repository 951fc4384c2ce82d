// crates/ecgpack-cli/tests/pack_unpack_roundtrip.rs

use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn tmp_path(name: &str, ext: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let pid = std::process::id();
    p.push(format!("ecgpack_{}_{}_{}.{}", name, pid, nanos, ext));
    p
}

fn run_ok(cmd: &mut Command) {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

fn run_fail(cmd: &mut Command) {
    let out = cmd.output().expect("spawn command");
    assert!(!out.status.success(), "command unexpectedly succeeded");
}

fn write_record(path: &PathBuf, samples: &[u16]) {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    std::fs::write(path, bytes).expect("write record");
}

fn lcg_next(x: &mut u64) -> u64 {
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

#[test]
fn record_roundtrip_through_epk() {
    let mut seed: u64 = 0x5151_5151_5151_5151;
    // odd length on purpose: exercises the 2-byte tail unit
    let samples: Vec<u16> = (0..1001)
        .map(|_| ((lcg_next(&mut seed) >> 48) as u16) & 0x07FF)
        .collect();

    let record = tmp_path("rec", "bin");
    let epk = tmp_path("rec", "epk");
    let decoded = tmp_path("rec_decoded", "bin");
    write_record(&record, &samples);

    let mut pack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    pack.args([
        "pack",
        "--in",
        record.to_str().unwrap(),
        "--out",
        epk.to_str().unwrap(),
    ]);
    run_ok(&mut pack);

    let mut unpack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    unpack.args([
        "unpack",
        "--in",
        epk.to_str().unwrap(),
        "--out",
        decoded.to_str().unwrap(),
    ]);
    run_ok(&mut unpack);

    let original = std::fs::read(&record).unwrap();
    let restored = std::fs::read(&decoded).unwrap();
    assert_eq!(original, restored, "byte-for-byte roundtrip");

    // 1001 samples: 2002 raw bytes -> 500*3+2 = 1502 payload bytes
    let epk_len = std::fs::metadata(&epk).unwrap().len();
    assert!(epk_len < original.len() as u64, "packed artifact is smaller");

    for p in [&record, &epk, &decoded] {
        std::fs::remove_file(p).ok();
    }
}

#[test]
fn default_out_path_appends_c() {
    let samples: Vec<u16> = vec![1, 2, 3, 4];
    let record = tmp_path("named", "bin");
    write_record(&record, &samples);

    let mut pack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    pack.args(["pack", "--in", record.to_str().unwrap()]);
    run_ok(&mut pack);

    // "<stem>C.epk" next to the input
    let expected = record.with_extension("").to_str().unwrap().to_string() + "C.epk";
    assert!(
        std::fs::metadata(&expected).is_ok(),
        "expected default artifact at {expected}"
    );

    std::fs::remove_file(&record).ok();
    std::fs::remove_file(&expected).ok();
}

#[test]
fn channel_select_packs_one_channel() {
    // 2 channels interleaved; channel 1 ramps
    let mut interleaved: Vec<u16> = Vec::new();
    for i in 0..10u16 {
        interleaved.push(100 + i); // ch0
        interleaved.push(2000 - i); // ch1
    }
    let record = tmp_path("multi", "bin");
    let epk = tmp_path("multi", "epk");
    let decoded = tmp_path("multi_decoded", "bin");
    write_record(&record, &interleaved);

    let mut pack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    pack.args([
        "pack",
        "--in",
        record.to_str().unwrap(),
        "--out",
        epk.to_str().unwrap(),
        "--channels",
        "2",
        "--channel",
        "1",
    ]);
    run_ok(&mut pack);

    let mut unpack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    unpack.args([
        "unpack",
        "--in",
        epk.to_str().unwrap(),
        "--out",
        decoded.to_str().unwrap(),
    ]);
    run_ok(&mut unpack);

    let restored = std::fs::read(&decoded).unwrap();
    let expect: Vec<u8> = (0..10u16)
        .flat_map(|i| (2000 - i).to_le_bytes())
        .collect();
    assert_eq!(restored, expect);

    for p in [&record, &epk, &decoded] {
        std::fs::remove_file(p).ok();
    }
}

#[test]
fn strict_pack_rejects_out_of_range_record() {
    let record = tmp_path("hot", "bin");
    let epk = tmp_path("hot", "epk");
    write_record(&record, &[100, 4095]); // 4095 > 2047

    let mut pack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    pack.args([
        "pack",
        "--in",
        record.to_str().unwrap(),
        "--out",
        epk.to_str().unwrap(),
    ]);
    run_fail(&mut pack);

    // --lossy masks instead
    let mut lossy = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    lossy.args([
        "pack",
        "--in",
        record.to_str().unwrap(),
        "--out",
        epk.to_str().unwrap(),
        "--lossy",
    ]);
    run_ok(&mut lossy);

    std::fs::remove_file(&record).ok();
    std::fs::remove_file(&epk).ok();
}

#[test]
fn raw_mode_roundtrip_with_count() {
    let samples: Vec<u16> = vec![0x7FF, 0, 0x100, 0x0FF, 5]; // odd length
    let record = tmp_path("raw", "bin");
    let pkd = tmp_path("raw", "pkd");
    let decoded = tmp_path("raw_decoded", "bin");
    write_record(&record, &samples);

    let mut pack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    pack.args([
        "pack",
        "--in",
        record.to_str().unwrap(),
        "--out",
        pkd.to_str().unwrap(),
        "--raw",
    ]);
    run_ok(&mut pack);

    // 5 samples -> 3*2 + 2 = 8 bytes, no header
    assert_eq!(std::fs::metadata(&pkd).unwrap().len(), 8);

    let mut unpack = Command::new(env!("CARGO_BIN_EXE_ecgpack-cli"));
    unpack.args([
        "unpack",
        "--in",
        pkd.to_str().unwrap(),
        "--out",
        decoded.to_str().unwrap(),
        "--raw",
        "--count",
        "5",
    ]);
    run_ok(&mut unpack);

    assert_eq!(
        std::fs::read(&record).unwrap(),
        std::fs::read(&decoded).unwrap()
    );

    for p in [&record, &pkd, &decoded] {
        std::fs::remove_file(p).ok();
    }
}
