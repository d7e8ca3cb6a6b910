use assert_cmd::Command;
use predicates::prelude::*;
use pptx_reader_pptx::test_support::{docx_package, PptxBuilder};
use std::path::PathBuf;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("read-pptx").unwrap()
}

fn write_deck(dir: &TempDir, name: &str, builder: PptxBuilder) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, builder.build()).unwrap();
    path
}

fn rule(c: char) -> String {
    c.to_string().repeat(80)
}

#[test]
fn no_args_prints_json_error_and_fails() {
    cmd()
        .assert()
        .code(1)
        .stdout("{\"error\": \"No file path provided\"}\n")
        .stderr("");
}

#[test]
fn missing_file_reports_error_with_success_status() {
    cmd()
        .arg("missing.pptx")
        .assert()
        .code(0)
        .stdout("{\n  \"error\": \"File not found: missing.pptx\"\n}\n")
        .stderr("");
}

#[test]
fn corrupt_file_reports_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pptx");
    std::fs::write(&path, "plain text, not a presentation").unwrap();

    cmd()
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with(
            "{\n  \"error\": \"Error reading PowerPoint: ",
        ))
        .stdout(predicate::str::ends_with("\"\n}\n"));
}

#[test]
fn word_document_reports_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("letter.docx");
    std::fs::write(&path, docx_package()).unwrap();

    cmd()
        .arg(&path)
        .assert()
        .code(0)
        .stdout(
            "{\n  \"error\": \"Error reading PowerPoint: Unsupported or unrecognized file format: \
             not a PowerPoint file, content-type is \
             'application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml'\"\n}\n",
        )
        .stderr("");
}

#[test]
fn hyphen_prefixed_missing_path_is_a_file_path() {
    for name in ["-deck.pptx", "--help.pptx", "-v.pptx"] {
        cmd()
            .arg(name)
            .assert()
            .code(0)
            .stdout(format!(
                "{{\n  \"error\": \"File not found: {}\"\n}}\n",
                name
            ))
            .stderr("");
    }
}

#[test]
fn hyphen_prefixed_existing_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    write_deck(&dir, "-deck.pptx", PptxBuilder::new().slide(&["Dash"]));

    cmd()
        .current_dir(dir.path())
        .arg("-deck.pptx")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\n# PowerPoint Content: -deck.pptx\n"))
        .stdout(predicate::str::contains("Dash\n"))
        .stderr("");
}

#[test]
fn unknown_flags_after_file_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_deck(&dir, "deck.pptx", PptxBuilder::new().slide(&["Hi"]));

    cmd()
        .arg(&path)
        .args(["--bogus", "-x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Slides: 1\n"))
        .stderr("");
}

#[test]
fn prints_report_for_each_slide() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_deck(
        &dir,
        "Quarterly Review.pptx",
        PptxBuilder::new()
            .slide(&["Title", "Body"])
            .slide(&[]),
    );

    let expected = format!(
        "\n# PowerPoint Content: Quarterly Review.pptx\n\n\
         Total Slides: 2\n\n\
         {eq}\n\n\
         ## Slide 1\n{dash}\nTitle\nBody\n\n{eq}\n\n\
         ## Slide 2\n{dash}\n\n\n{eq}\n\n",
        eq = rule('='),
        dash = rule('-'),
    );

    cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(expected)
        .stderr("");
}

#[test]
fn header_uses_base_name_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_deck(&dir, "deck.pptx", PptxBuilder::new().slide(&["Hi"]));

    cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\n# PowerPoint Content: deck.pptx\n"))
        .stdout(predicate::str::contains(dir.path().to_str().unwrap()).not());
}

#[test]
fn extra_arguments_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_deck(&dir, "deck.pptx", PptxBuilder::new().slide(&["Hi"]));

    cmd()
        .arg(&path)
        .arg("unused")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Slides: 1\n"));
}

#[test]
fn output_is_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_deck(
        &dir,
        "deck.pptx",
        PptxBuilder::new()
            .slide(&["Größe & Maß", "naïve café"])
            .slide(&["Second"])
            .order(&[1, 0]),
    );

    let first = cmd().arg(&path).output().unwrap();
    let second = cmd().arg(&path).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).unwrap();
    let slide1 = text.find("## Slide 1").unwrap();
    let second_pos = text.find("Second").unwrap();
    let umlaut_pos = text.find("Größe & Maß\nnaïve café").unwrap();
    assert!(slide1 < second_pos && second_pos < umlaut_pos);
}

#[test]
fn help_lists_file_argument() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--verbose"));
}
