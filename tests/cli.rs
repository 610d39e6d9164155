use std::process::{Command, Output};

fn bmp_console(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bmp-console"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_draw() {
    let out = bmp_console(&["test_bmp/checker_2x2_24.bmp"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "██  \n  ██\n");
    assert!(out.stderr.is_empty());

    let out = bmp_console(&["--ascii", "test_bmp/checker_2x2_24.bmp"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "##  \n  ##\n");
}

#[test]
fn test_usage() {
    for args in [&[][..], &["a.bmp", "b.bmp"][..]].iter() {
        let out = bmp_console(args);
        assert_eq!(out.status.code(), Some(1));
        assert!(out.stdout.is_empty());
        assert!(String::from_utf8(out.stderr).unwrap().contains("Usage"));
    }

    let out = bmp_console(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn test_errors() {
    let out = bmp_console(&["test_bmp/gray_24.bmp"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("Error: non-monochrome pixel encountered"));

    let out = bmp_console(&["test_bmp/missing.bmp"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("Error: could not open file"));

    let out = bmp_console(&["Cargo.toml"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("Error: not a bitmap file"));
}
