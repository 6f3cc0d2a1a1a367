use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const SAM: &str = "I am Sam. Sam I am. I do not like this Sam I am.\n";

// Write some text repeatedly so that compression pays off with either header.
fn make_input(temp_dir: &tempfile::TempDir,name: &str,txt: &str,reps: usize) -> Result<PathBuf,Box<dyn std::error::Error>> {
    let path = temp_dir.path().join(name);
    std::fs::write(&path,txt.repeat(reps))?;
    Ok(path)
}

fn round_trip_test(format: &str) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"sam.txt",SAM,100)?;
    let cmp_path = temp_dir.path().join("sam.huf");
    let out_path = temp_dir.path().join("sam_expanded.txt");
    Command::cargo_bin("huffpress")?
        .arg("compress")
        .arg("-f").arg(format)
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&cmp_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("compressed 4900 into"));
    Command::cargo_bin("huffpress")?
        .arg("expand")
        .arg("-i").arg(&cmp_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    match (std::fs::read(in_path),std::fs::read(cmp_path),std::fs::read(out_path)) {
        (Ok(v1),Ok(c),Ok(v2)) => {
            assert!(c.len() < v1.len());
            assert_eq!(c[0..4].to_vec(),vec![0xfau8,0xce,0x82,0x00]);
            assert_eq!(v1,v2);
        },
        _ => panic!("unable to compare output with reference")
    }
    Ok(())
}

#[test]
fn tree_round_trip() -> STDRESULT {
    round_trip_test("tree")
}

#[test]
fn counts_round_trip() -> STDRESULT {
    round_trip_test("counts")
}

#[test]
fn refusal_leaves_no_file() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"ab.txt","ab",1)?;
    let out_path = temp_dir.path().join("ab.huf");
    Command::cargo_bin("huffpress")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("no output written"));
    assert!(!out_path.exists());
    Command::cargo_bin("huffpress")?
        .arg("compress")
        .arg("--force")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    assert!(out_path.exists());
    Ok(())
}

#[test]
fn bad_magic_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"not_huff.bin",SAM,1)?;
    let out_path = temp_dir.path().join("expanded.txt");
    Command::cargo_bin("huffpress")?
        .arg("expand")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("magic number"));
    assert!(!out_path.exists());
    Ok(())
}

#[test]
fn stats_report() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"abc.txt","AAAAABBBCC",1)?;
    Command::cargo_bin("huffpress")?
        .arg("stats")
        .arg("-f").arg("tree")
        .arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bits saved:  -79"));
    Ok(())
}
