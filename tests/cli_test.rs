//! Integration tests for the strategen CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn strategen() -> Command {
    Command::cargo_bin("strategen").unwrap()
}

#[test]
fn test_aggregate_command_writes_files() {
    let temp_dir = TempDir::new().unwrap();

    strategen()
        .arg("aggregate")
        .args(["--name", "Order"])
        .args(["--property", "Total:decimal", "--property", "Notes:string?"])
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 4 file(s)"));

    let folder = temp_dir.path().join("Orders");
    assert!(folder.join("Order.cs").is_file());
    assert!(folder.join("OrdersController.cs").is_file());

    let entity = std::fs::read_to_string(folder.join("Order.cs")).unwrap();
    assert!(entity.contains("public string? Notes { get; set; }"));
}

#[test]
fn test_aggregate_command_reads_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("strategen.yaml"),
        "root_namespace: Contoso.Sales\nid_property: short\nid_format: int\n",
    )
    .unwrap();

    strategen()
        .arg("aggregate")
        .args(["--name", "Invoice", "--property", "Amount:decimal"])
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let entity = std::fs::read_to_string(temp_dir.path().join("Invoices/Invoice.cs")).unwrap();
    assert!(entity.contains("namespace Contoso.Sales.Invoices;"));
    assert!(entity.contains("public int Id { get; set; }"));
}

#[test]
fn test_invalid_property_fails() {
    let temp_dir = TempDir::new().unwrap();

    strategen()
        .arg("aggregate")
        .args(["--name", "Order", "--property", "Total"])
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid property 'Total'"));

    assert!(!temp_dir.path().join("Orders").exists());
}

#[test]
fn test_solution_dry_run_lists_commands() {
    let temp_dir = TempDir::new().unwrap();

    strategen()
        .arg("solution")
        .args(["--name", "Shop", "--layout", "microservice", "--dry-run"])
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("run `dotnet new sln -n Shop -o Shop`"))
        .stdout(predicate::str::contains("dotnet new webapi -n Shop.Api"))
        .stdout(predicate::str::contains("package Swashbuckle.AspNetCore"))
        .stdout(predicate::str::contains("Directory.Build.props"))
        .stdout(predicate::str::contains("with 4 project(s)"));

    assert!(!temp_dir.path().join("Shop").exists());
}

#[cfg(unix)]
#[test]
fn test_solution_dry_run_quotes_paths_with_spaces() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("my projects");
    let project_dir = output_dir.join("Shop").join("Shop.Api");

    strategen()
        .arg("solution")
        .args(["--name", "Shop", "--dry-run"])
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "dotnet new webapi -n Shop.Api -o '{}'",
            project_dir.display()
        )));
}

#[test]
fn test_solution_without_name_fails() {
    let temp_dir = TempDir::new().unwrap();

    strategen()
        .arg("solution")
        .arg("--dry-run")
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No solution name"));
}

#[test]
fn test_strategies_command() {
    strategen()
        .arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("FileArtifactStrategy"))
        .stdout(predicate::str::contains("AggregateModel"))
        .stdout(predicate::str::contains("DocumentSyntaxStrategy"));
}

#[test]
fn test_strategies_command_json() {
    let output = strategen().args(["strategies", "--json"]).output().unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 19);
    assert!(rows.iter().any(|row| row["model"] == "SolutionModel"
        && row["strategy"] == "SolutionArtifactStrategy"
        && row["kind"] == "artifact"));
}

#[test]
fn test_templates_list_command() {
    strategen()
        .arg("templates")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Embedded templates"))
        .stdout(predicate::str::contains("methods/get_by_id"));
}

#[test]
fn test_templates_export_command() {
    let temp_dir = TempDir::new().unwrap();

    strategen()
        .arg("templates")
        .arg("export")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 7 template(s)"));

    assert!(temp_dir.path().join("solution/README.md.tera").exists());
}
