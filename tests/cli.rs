use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn pystructure() -> Command {
    Command::cargo_bin("pystructure").unwrap()
}

const SAMPLE: &str = r#"x = 1

def greet(name, greeting="hi"):
    pass

class Dog(Animal):
    def bark(self):
        pass
"#;

#[test]
fn prints_outline_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sample.py");
    fs::write(&src, SAMPLE).unwrap();

    pystructure()
        .arg(&src)
        .assert()
        .success()
        .stdout("v x\nf greet(name, greeting=\"hi\")\nc Dog(Animal)\n  f bark(self)\n");
}

#[test]
fn writes_outline_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sample.py");
    let out = dir.path().join("out.txt");
    fs::write(&src, SAMPLE).unwrap();

    pystructure()
        .arg(&src)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, "v x\nf greet(name, greeting=\"hi\")\nc Dog(Animal)\n  f bark(self)");
}

#[test]
fn indent_flag_changes_nesting() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sample.py");
    fs::write(&src, SAMPLE).unwrap();

    pystructure()
        .arg(&src)
        .args(["--indent", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n    f bark(self)"));
}

#[test]
fn json_output_contains_structure() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sample.py");
    fs::write(&src, SAMPLE).unwrap();

    let output = pystructure().arg(&src).arg("--json").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["structure"][0]["kind"], "v");
    assert_eq!(json["structure"][2]["content"]["class"]["name"], "Dog(Animal)");
    assert_eq!(json["outline_lines"], 4);
}

#[test]
fn missing_source_fails() {
    pystructure()
        .arg("/no/such/file.py")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn malformed_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("broken.py");
    fs::write(&src, "def broken(:\n").unwrap();

    pystructure()
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"));
}

#[test]
fn directory_outlines_every_python_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pkg")).unwrap();
    fs::write(dir.path().join("pkg").join("a.py"), "A = 1\n").unwrap();
    fs::write(dir.path().join("b.py"), "def b(): pass\n").unwrap();
    fs::write(dir.path().join("readme.md"), "# readme\n").unwrap();

    let expected = format!(
        "# b.py\nf b()\n\n# {}\nv A\n",
        std::path::Path::new("pkg").join("a.py").display()
    );
    pystructure().arg(dir.path()).assert().success().stdout(expected);
}

#[test]
fn directory_with_broken_file_reports_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.py"), "x = 1\n").unwrap();
    fs::write(dir.path().join("bad.py"), "class (:\n").unwrap();

    pystructure()
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("# bad.py: error: parse error"))
        .stdout(predicate::str::contains("# good.py\nv x"));
}

#[test]
fn rejects_indent_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sample.py");
    fs::write(&src, SAMPLE).unwrap();

    pystructure()
        .arg(&src)
        .args(["--indent", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--indent"));
}

#[test]
fn cap_flag_truncates_long_lines() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("wide.py");
    let params: Vec<String> = (0..80).map(|i| format!("parameter_{}", i)).collect();
    fs::write(&src, format!("def wide({}): pass\n", params.join(", "))).unwrap();
    let full = format!("f wide({})\n", params.join(", "));

    pystructure().arg(&src).assert().success().stdout(full);

    pystructure()
        .arg(&src)
        .arg("--cap")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("...\n"))
        .stdout(predicate::str::contains("parameter_79").not());
}
