use assert_cmd::Command;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  cidrlist Binary Tests
-------------------------------------------------------------------------------------------------*/

fn test_data_file(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "data", name]
        .iter()
        .collect()
}

fn stdout_lines(command: &mut Command) -> Vec<String> {
    let output = command.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| line.to_string())
        .collect()
}

/*--------------------------------------------------------------------------------------
  Version
--------------------------------------------------------------------------------------*/

#[test]
fn command_version() {
    Command::cargo_bin("cidrlist")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

/*--------------------------------------------------------------------------------------
  Required Arguments
--------------------------------------------------------------------------------------*/

#[test]
fn command_no_args() {
    Command::cargo_bin("cidrlist").unwrap().assert().failure();
}

#[test]
fn command_missing_file() {
    Command::cargo_bin("cidrlist")
        .unwrap()
        .arg("--file")
        .arg(test_data_file("missing.txt"))
        .assert()
        .failure();
}

/*--------------------------------------------------------------------------------------
  Output Formats
--------------------------------------------------------------------------------------*/

/*-----------------------------------------------------------------------------
  Output: Table
-----------------------------------------------------------------------------*/

#[test]
fn command_output_table() {
    Command::cargo_bin("cidrlist")
        .unwrap()
        .arg("--file")
        .arg(test_data_file("prefixes.txt"))
        .arg("--output")
        .arg("table")
        .arg("--summary")
        .assert()
        .success();
}

/*-----------------------------------------------------------------------------
  Output: CIDR
-----------------------------------------------------------------------------*/

#[test]
fn command_output_cidr() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("-o")
            .arg("cidr"),
    );

    assert_eq!(
        lines,
        vec![
            "0.0.0.0/24",
            "0.0.1.0/24",
            "0.0.2.0/24",
            "0.1.0.0/23",
            "10.0.0.0/24",
            "10.0.1.0/24",
            "2001:db8::/33",
            "2001:db8:8000::/33",
        ]
    );
}

#[test]
fn command_output_cidr_merged() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("--merge")
            .arg("-o")
            .arg("cidr"),
    );

    assert_eq!(
        lines,
        vec![
            "0.0.0.0/23",
            "0.0.2.0/24",
            "0.1.0.0/23",
            "10.0.0.0/23",
            "2001:db8::/32",
        ]
    );
}

/*-----------------------------------------------------------------------------
  Output: JSON
-----------------------------------------------------------------------------*/

#[test]
fn command_output_json() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.json"))
            .arg("-m")
            .arg("-o")
            .arg("json"),
    );

    let json = lines.join("\n");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"prefixes": ["192.168.0.0/23", "2001:db8:1::/48"]})
    );
}

/*--------------------------------------------------------------------------------------
  Multiple Files
--------------------------------------------------------------------------------------*/

#[test]
fn command_multiple_files() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("-f")
            .arg(test_data_file("prefixes.json"))
            .arg("-m")
            .arg("-o")
            .arg("cidr"),
    );

    assert_eq!(lines.len(), 6);
    assert!(lines.contains(&"192.168.0.0/23".to_string()));
}

/*--------------------------------------------------------------------------------------
  Invalid Entries
--------------------------------------------------------------------------------------*/

#[test]
fn command_lenient_skips_invalid_entries() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("invalid.txt"))
            .arg("-o")
            .arg("cidr"),
    );

    assert_eq!(lines, vec!["10.0.0.0/8", "11.0.0.0/8"]);
}

#[test]
fn command_strict_rejects_invalid_entries() {
    Command::cargo_bin("cidrlist")
        .unwrap()
        .arg("-f")
        .arg(test_data_file("invalid.txt"))
        .arg("--strict")
        .assert()
        .failure();
}

/*--------------------------------------------------------------------------------------
  Address Family Filters
--------------------------------------------------------------------------------------*/

#[test]
fn command_ipv4_prefixes() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("-4")
            .arg("-o")
            .arg("cidr"),
    );

    assert_eq!(lines.len(), 6);
    assert!(lines.iter().all(|line| !line.contains(':')));
}

#[test]
fn command_ipv6_prefixes() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("-6")
            .arg("-o")
            .arg("cidr"),
    );

    assert_eq!(lines, vec!["2001:db8::/33", "2001:db8:8000::/33"]);
}

#[test]
fn command_ipv4_prefixes_under_ipv6_supernet() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("supernet.txt"))
            .arg("-4")
            .arg("-o")
            .arg("cidr"),
    );

    assert_eq!(lines, vec!["0.0.0.0/0"]);
}

#[test]
fn command_ipv6_lookup_under_ipv6_supernet() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("supernet.txt"))
            .arg("-6")
            .arg("-o")
            .arg("json")
            .arg("10.1.2.3")
            .arg("2001:db8::1"),
    );

    let value: serde_json::Value = serde_json::from_str(&lines.join("\n")).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "matches": {"2001:db8::1": "2000::/3"},
            "not_found": ["10.1.2.3"]
        })
    );
}

/*--------------------------------------------------------------------------------------
  Address Lookups
--------------------------------------------------------------------------------------*/

#[test]
fn command_lookup_cidr() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("-o")
            .arg("cidr")
            .arg("10.0.1.5")
            .arg("2001:db8:ffff::1")
            .arg("192.0.2.1"),
    );

    assert_eq!(lines, vec!["10.0.1.0/24", "2001:db8:8000::/33"]);
}

#[test]
fn command_lookup_table() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("10.0.1.5")
            .arg("192.0.2.1"),
    );

    let table = lines.join("\n");
    assert!(table.contains("10.0.1.0/24"));
    assert!(table.contains("not found"));
}

#[test]
fn command_lookup_json() {
    let lines = stdout_lines(
        Command::cargo_bin("cidrlist")
            .unwrap()
            .arg("-f")
            .arg(test_data_file("prefixes.txt"))
            .arg("-m")
            .arg("-o")
            .arg("json")
            .arg("10.0.1.5")
            .arg("192.0.2.1")
            .arg("not-an-address"),
    );

    let value: serde_json::Value = serde_json::from_str(&lines.join("\n")).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "matches": {"10.0.1.5": "10.0.0.0/23"},
            "not_found": ["192.0.2.1"]
        })
    );
}

#[test]
fn command_lookup_csv_in_address_order() {
    let csv_file =
        std::env::temp_dir().join(format!("cidrlist-lookup-{}.csv", std::process::id()));

    Command::cargo_bin("cidrlist")
        .unwrap()
        .arg("-f")
        .arg(test_data_file("prefixes.txt"))
        .arg("-o")
        .arg("cidr")
        .arg("--csv")
        .arg(&csv_file)
        .arg("2001:db8::1")
        .arg("192.0.2.1")
        .arg("10.0.1.5")
        .assert()
        .success();

    let contents = std::fs::read_to_string(&csv_file).unwrap();
    std::fs::remove_file(&csv_file).unwrap();

    let rows: Vec<&str> = contents.lines().collect();
    assert_eq!(
        rows,
        vec![
            "IP Address,IP Prefix",
            "10.0.1.5,10.0.1.0/24",
            "192.0.2.1,",
            "2001:db8::1,2001:db8::/33",
        ]
    );
}

/*--------------------------------------------------------------------------------------
  CSV Output
--------------------------------------------------------------------------------------*/

#[test]
fn command_save_csv() {
    let csv_file = std::env::temp_dir().join(format!("cidrlist-{}.csv", std::process::id()));

    Command::cargo_bin("cidrlist")
        .unwrap()
        .arg("-f")
        .arg(test_data_file("prefixes.txt"))
        .arg("-m")
        .arg("-o")
        .arg("cidr")
        .arg("--csv")
        .arg(&csv_file)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&csv_file).unwrap();
    std::fs::remove_file(&csv_file).unwrap();

    let rows: Vec<&str> = contents.lines().collect();
    assert_eq!(rows[0], "IP Prefix,Address Family");
    assert_eq!(rows[1], "0.0.0.0/23,IPv4");
    assert_eq!(rows.len(), 6);
}
