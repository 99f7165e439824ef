//! End-to-end tests of the `pico-ea-submit` binary.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tempfile::tempdir;

/// The template shipped with the crate.
const TEMPLATE: &str = include_str!("../templates/job_template.xml");

/// Creates a source tree with the shipped template and a steering macro.
fn source_tree() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("templates")).unwrap();
    fs::create_dir_all(dir.path().join("StRoot").join("StPicoEASkimmer")).unwrap();
    fs::write(dir.path().join("templates/job_template.xml"), TEMPLATE).unwrap();
    fs::write(
        dir.path().join("runPicoEASkim.C"),
        "void runPicoEASkim(const char* list, const char* out) {}\n",
    )
    .unwrap();
    dir
}

/// Runs the binary in `cwd` with the given arguments.
fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pico-ea-submit"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pico-ea-submit")
}

/// Gets a path as a string argument.
fn arg(path: &Path) -> &str {
    path.to_str().expect("temporary paths should be UTF-8")
}

#[test]
fn filelist_end_to_end() {
    let src = source_tree();
    let gpfs = tempdir().unwrap();

    let output = run(
        src.path(),
        &[
            "--daytag",
            "240101",
            "--input-list",
            "/data/list.txt",
            "--gpfs-base",
            arg(gpfs.path()),
        ],
    );
    assert!(
        output.status.success(),
        "command failed: {stderr}",
        stderr = String::from_utf8_lossy(&output.stderr)
    );

    let submission = gpfs.path().join("submission").join("240101");
    let xml_path = submission.join("pico_ea_240101.xml");
    let metadata_path = submission.join("METADATA_240101.txt");
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!(
            "Wrote: {xml}\nMetadata: {metadata}\nDone\n",
            xml = xml_path.display(),
            metadata = metadata_path.display()
        )
    );
    assert!(gpfs.path().join("production").join("240101").is_dir());

    let xml = fs::read_to_string(&xml_path).unwrap();
    assert!(!xml.contains("__"), "unfilled placeholder in:\n{xml}");
    assert!(xml.contains(r#"simulateSubmission="false""#));
    assert!(xml.contains(r#"<input URL="filelist:/data/list.txt" nFiles="all" />"#));
    assert!(xml.contains("eaTree_$JOBID.root"));
    assert!(xml.contains(r#"<Package name="pico_ea_240101">"#));
    assert_eq!(xml.matches("<File>").count(), 2);
    // The source tree defaults to the working directory, which the OS reports
    // with symlinks resolved.
    let cwd = src.path().canonicalize().unwrap();
    assert!(xml.contains(&format!(
        "      <File>file:{src}/StRoot/</File>\n      <File>file:{src}/runPicoEASkim.C</File>\n",
        src = cwd.display()
    )));

    let metadata = fs::read_to_string(&metadata_path).unwrap();
    assert!(metadata.contains("git_commit: UNKNOWN\n"));
    assert!(metadata.contains("steering_snapshot: <not-copied>\n"));
    assert!(metadata.contains(&format!("xml: {}\n", xml_path.display())));
}

#[test]
fn catalog_with_output_dir_and_runtime() {
    let src = source_tree();
    fs::create_dir(src.path().join(".sl73_gcc485")).unwrap();
    let gpfs = tempdir().unwrap();
    let out = tempdir().unwrap();
    let query = "trgsetupname=pp500_production_2017&filetype=daq_reco_picoDst";

    let output = run(
        src.path(),
        &[
            "--daytag",
            "240102",
            "--input-catalog",
            query,
            "--gpfs-base",
            arg(gpfs.path()),
            "--output-dir",
            arg(out.path()),
            "--simulate",
            "--xml-name",
            "custom.xml",
            "--out-prefix",
            "tree",
        ],
    );
    assert!(output.status.success());

    let snapshot = out.path().join("steering_snapshot").join("runPicoEASkim.C");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(&format!("Steering copied to: {}\n", snapshot.display())));
    assert!(snapshot.is_file());

    let xml = fs::read_to_string(out.path().join("custom.xml")).unwrap();
    assert!(xml.contains(r#"simulateSubmission="true""#));
    assert!(xml.contains(&format!(
        r#"<input URL="catalog:star.bnl.gov?{query}" nFiles="all" />"#
    )));
    assert!(xml.contains("tree_$JOBID.root"));
    assert_eq!(xml.matches("<File>").count(), 3);
    assert!(xml.contains(&format!(
        "toURL=\"file:{}/\"",
        gpfs.path().join("production").join("240102").display()
    )));

    let metadata = fs::read_to_string(out.path().join("METADATA_240102.txt")).unwrap();
    assert!(metadata.contains(&format!("steering_snapshot: {}\n", snapshot.display())));
}

#[test]
fn relative_filelist_is_absolute() {
    let src = source_tree();
    let gpfs = tempdir().unwrap();

    let output = run(
        src.path(),
        &[
            "--daytag",
            "240101",
            "--input-list",
            "lists/files.list",
            "--gpfs-base",
            arg(gpfs.path()),
        ],
    );
    assert!(output.status.success());

    let metadata =
        fs::read_to_string(gpfs.path().join("submission/240101/METADATA_240101.txt")).unwrap();
    assert!(metadata.contains(&format!(
        "input_element: <input URL=\"filelist:{}\" nFiles=\"all\" />\n",
        src.path().canonicalize().unwrap().join("lists/files.list").display()
    )));
}

#[test]
fn rerun_succeeds() {
    let src = source_tree();
    let gpfs = tempdir().unwrap();
    let args = [
        "--daytag",
        "240101",
        "--input-catalog",
        "production=P17id",
        "--gpfs-base",
        arg(gpfs.path()),
    ];

    assert!(run(src.path(), &args).status.success());
    assert!(run(src.path(), &args).status.success());
}

#[test]
fn input_flags_are_exclusive() {
    let src = source_tree();
    let gpfs = tempdir().unwrap();

    let both = run(
        src.path(),
        &[
            "--daytag",
            "240101",
            "--input-catalog",
            "q",
            "--input-list",
            "files.list",
            "--gpfs-base",
            arg(gpfs.path()),
        ],
    );
    assert!(!both.status.success());

    let neither = run(
        src.path(),
        &["--daytag", "240101", "--gpfs-base", arg(gpfs.path())],
    );
    assert!(!neither.status.success());

    assert!(!gpfs.path().join("submission").exists());
}

#[test]
fn missing_template_fails() {
    let src = tempdir().unwrap();
    let gpfs = tempdir().unwrap();

    let output = run(
        src.path(),
        &[
            "--daytag",
            "240101",
            "--input-catalog",
            "q",
            "--gpfs-base",
            arg(gpfs.path()),
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read template"));
}
