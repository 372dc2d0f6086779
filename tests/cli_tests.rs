//! Command-line tests for the rna-interact binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUERY: &str = "AUGCUACGUGAAGGCU";
const TARGET: &str = "CUCCGCUUUCACGCGGAUUACG";

const TOOL_OUTPUT: &str = "\
id1;start1;end1;id2;start2;end2;subseqDP;hybridDP;E
ompA;3;14;RybB;2;13;;((((((((((((&))))))))))));-8.2
ompA;10;18;RybB;5;12;;((((((((&))))))));-6.1
ompA;1;6;RybB;1;6;;((((((&))))));-3.0
";

fn rna_interact() -> Command {
    Command::cargo_bin("rna-interact").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_help_lists_commands() {
    rna_interact()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("explain"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("fold"));
}

#[test]
fn test_predict_json() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);

    let json = stdout_json(rna_interact().args([
        "--format", "json", "predict", "--query", QUERY, "--target", TARGET, "-t", output.as_str(),
    ]));

    let interactions = json["interactions"].as_array().unwrap();
    assert_eq!(interactions.len(), 3);
    assert_eq!(interactions[0]["rank"], 1);
    assert_eq!(interactions[0]["deltaG"], -8.2);
    assert_eq!(interactions[0]["query_name"], "RybB");
    assert_eq!(interactions[0]["target_name"], "ompA");
    assert_eq!(json["query_name"], "query");
    assert_eq!(json["gc_content_query"], 0.5);
}

#[test]
fn test_predict_reads_stdin_and_fasta() {
    let dir = TempDir::new().unwrap();
    let query = write(dir.path(), "rybb.fa", &format!(">RybB sRNA\n{QUERY}\n"));
    let target = write(dir.path(), "ompa.fa", &format!(">ompA\n{TARGET}\n"));

    let json = stdout_json(
        rna_interact()
            .args([
                "--format",
                "json",
                "predict",
                "--query-fasta",
                query.as_str(),
                "--target-fasta",
                target.as_str(),
                "-t",
                "-",
            ])
            .write_stdin(TOOL_OUTPUT),
    );

    assert_eq!(json["query_name"], "RybB");
    assert_eq!(json["target_name"], "ompA");
    assert_eq!(json["interactions"].as_array().unwrap().len(), 3);
}

#[test]
fn test_predict_max_hits() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);

    let json = stdout_json(rna_interact().args([
        "--format", "json", "predict", "--query", QUERY, "--target", TARGET, "-t", output.as_str(),
        "-n", "2",
    ]));
    assert_eq!(json["interactions"].as_array().unwrap().len(), 2);
}

#[test]
fn test_predict_with_model_reranks() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);
    let model = write(
        dir.path(),
        "model.json",
        r#"{"intercept": 0.0, "weights": {"hybrid_length": -1.0}}"#,
    );

    let json = stdout_json(rna_interact().args([
        "--format", "json", "predict", "--query", QUERY, "--target", TARGET, "-t", output.as_str(),
        "--model", model.as_str(),
    ]));
    let interactions = json["interactions"].as_array().unwrap();
    assert_eq!(interactions[0]["deltaG"], -3.0);
    assert_eq!(interactions[0]["rank"], 1);
    assert_eq!(interactions[0]["quality_score"], -12.0);
}

#[test]
fn test_predict_missing_model_keeps_tool_order() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);

    let json = stdout_json(rna_interact().args([
        "--format",
        "json",
        "predict",
        "--query",
        QUERY,
        "--target",
        TARGET,
        "-t",
        output.as_str(),
        "--model",
        "/nonexistent/model.json",
    ]));
    let interactions = json["interactions"].as_array().unwrap();
    assert_eq!(interactions[0]["deltaG"], -8.2);
    assert!(interactions[0]["quality_score"].is_null());
}

#[test]
fn test_predict_tsv() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);

    rna_interact()
        .args([
            "--format", "tsv", "predict", "--query", QUERY, "--target", TARGET, "-t", output.as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rank\tquery_name\ttarget_name\tdeltaG"))
        .stdout(predicate::str::contains("1\tRybB\tompA\t-8.2\t2\t13\t3\t14\t24\t\n"));
}

#[test]
fn test_predict_text_header_only() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", "id1;start1;end1;E\n");

    rna_interact()
        .args(["predict", "--query", QUERY, "--target", TARGET, "-t", output.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no interactions — header only"));
}

#[test]
fn test_predict_empty_sequence_fails() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);

    rna_interact()
        .args(["predict", "--query", "   ", "--target", TARGET, "-t", output.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("query sequence must be non-empty"));
}

#[test]
fn test_predict_upstream_failure_passes_through() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", "");
    let stderr = write(dir.path(), "run.err", "unknown option --foo\n");

    let json = stdout_json(rna_interact().args([
        "--format",
        "json",
        "predict",
        "--query",
        QUERY,
        "--target",
        TARGET,
        "-t",
        output.as_str(),
        "--tool-stderr",
        stderr.as_str(),
        "--exit-code",
        "2",
    ]));
    assert_eq!(json["exit_code"], 2);
    assert_eq!(json["stderr"], "unknown option --foo\n");
    assert!(json.get("interactions").is_none());
}

#[test]
fn test_explain_json() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);

    let json = stdout_json(rna_interact().args([
        "--format", "json", "explain", "--query", QUERY, "--target", TARGET, "-t", output.as_str(),
    ]));
    assert_eq!(json["top_interaction"]["deltaG"], -8.2);
    assert_eq!(json["explain"]["deltaG_rank1"], -8.2);
    assert_eq!(json["explain"]["rank1_index"], 1);
    assert_eq!(json["explain"]["relative_affinity"], 1.0);
    assert_eq!(json["explain"]["seed_match"], false);
    assert_eq!(
        json["explain"]["why_rank1"],
        "lowest energy among predicted interactions; compact hybridization window"
    );
}

#[test]
fn test_explain_text() {
    let dir = TempDir::new().unwrap();
    let output = write(dir.path(), "run.csv", TOOL_OUTPUT);

    rna_interact()
        .args(["explain", "--query", QUERY, "--target", TARGET, "-t", output.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Relative affinity: 1.000"))
        .stdout(predicate::str::contains("lowest energy among predicted interactions"));
}

#[test]
fn test_batch_manifest() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "run.csv", TOOL_OUTPUT);
    let manifest = write(
        dir.path(),
        "jobs.json",
        &format!(
            r#"[
                {{"srna": "{QUERY}", "mrna": "{TARGET}", "srna_name": "RybB", "tool_output": "run.csv"}},
                {{"query": "", "target": "{TARGET}", "tool_output": "run.csv"}},
                {{"query": "{QUERY}", "target": "{TARGET}", "tool_output": "run.csv", "exit_code": 1}}
            ]"#
        ),
    );

    let json = stdout_json(rna_interact().args(["--format", "json", "batch", manifest.as_str()]));
    assert_eq!(json["count"], 3);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["query_name"], "RybB");
    assert_eq!(results[0]["interactions"].as_array().unwrap().len(), 3);
    assert!(results[1]["error"]
        .as_str()
        .unwrap()
        .contains("must be non-empty"));
    assert_eq!(results[2]["exit_code"], 1);
}

#[test]
fn test_batch_missing_tool_output_fails_only_that_job() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ok.csv", TOOL_OUTPUT);
    let manifest = write(
        dir.path(),
        "jobs.json",
        &format!(
            r#"[
                {{"query": "{QUERY}", "target": "{TARGET}", "tool_output": "ok.csv"}},
                {{"query": "{QUERY}", "target": "{TARGET}", "tool_output": "missing.csv"}}
            ]"#
        ),
    );

    let json = stdout_json(rna_interact().args(["--format", "json", "batch", manifest.as_str()]));
    assert_eq!(json["count"], 2);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["interactions"].as_array().unwrap().len(), 3);
    assert!(results[1]["error"]
        .as_str()
        .unwrap()
        .contains("Failed to read tool output"));
    assert!(results[1].get("interactions").is_none());
}

#[test]
fn test_fold_json() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "fold.txt",
        ">RybB\nGGGAAAUCCC\n(((....))) ( -1.20)\n",
    );

    let json = stdout_json(rna_interact().args(["--format", "json", "fold", input.as_str()]));
    assert_eq!(json["name"], "RybB");
    assert_eq!(json["structure"], "(((....)))");
    assert_eq!(json["mfe"], -1.2);
    assert_eq!(json["gc_content"], 0.6);
}

#[test]
fn test_fold_rejects_short_input() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "fold.txt", ">RybB\nGGGAAAUCCC\n");

    rna_interact()
        .args(["fold", input.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 lines"));
}
