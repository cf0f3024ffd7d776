use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

/// Run csvchart with `args`, feeding `stdin` when given.
fn run_csvchart(args: &[&str], stdin: Option<&str>) -> Result<Vec<u8>, String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_csvchart"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut handle) = child.stdin.take() {
        if let Some(content) = stdin {
            handle
                .write_all(content.as_bytes())
                .map_err(|e| format!("Failed to write to stdin: {}", e))?;
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
}

/// Every chart kind with a column binding that works on the fixtures.
const IMAGE_CASES: [(&str, &str); 5] = [
    ("bar(x: region, y: sales)", "test/sales.csv"),
    ("line(x: day, y: temperature)", "test/timeseries.csv"),
    ("pie(label: region, value: sales)", "test/sales.csv"),
    ("scatter(x: units, y: sales)", "test/sales.csv"),
    ("histogram(data: height)", "test/heights.csv"),
];

fn run_json(chart: &str, input: &str) -> Value {
    let out = run_csvchart(&[chart, "--input", input, "--format", "json"], None)
        .unwrap_or_else(|e| panic!("csvchart failed: {}", e));
    serde_json::from_slice(&out).expect("output is not JSON")
}

#[test]
fn test_end_to_end_bar_chart() {
    let chart = run_json("bar(x: region, y: sales)", "test/sales.csv");
    assert_eq!(chart["kind"], "bar");
    assert_eq!(chart["title"], "sales by region");
    assert_eq!(chart["labels"], serde_json::json!(["North", "South", "East", "West"]));
    assert_eq!(chart["datasets"][0]["data"], serde_json::json!([120.0, 80.0, 150.0, 95.0]));
}

#[test]
fn test_end_to_end_line_sorted() {
    let chart = run_json("line(x: day, y: temperature)", "test/timeseries.csv");
    assert_eq!(chart["labels"], serde_json::json!([1.0, 2.0, 3.0, 4.0, 5.0]));
    assert_eq!(
        chart["datasets"][0]["data"],
        serde_json::json!([18.0, 19.25, 21.5, 22.1, 23.0])
    );
}

#[test]
fn test_end_to_end_pie_defaults_to_first_columns() {
    let chart = run_json("pie", "test/sales.csv");
    assert_eq!(chart["title"], "sales Distribution by region");
    assert_eq!(chart["datasets"][0]["backgroundColor"][1], "hsl(90, 70%, 60%)");
}

#[test]
fn test_end_to_end_scatter() {
    let chart = run_json("scatter(x: units, y: sales)", "test/sales.csv");
    assert_eq!(chart["datasets"][0]["data"][0], serde_json::json!({"x": 12.0, "y": 120.0}));
    assert!(chart.get("labels").is_none());
}

#[test]
fn test_end_to_end_histogram() {
    let chart = run_json("histogram(data: height)", "test/heights.csv");
    assert_eq!(
        chart["labels"],
        serde_json::json!(["1.00 - 3.25", "3.25 - 5.50", "5.50 - 7.75", "7.75 - 10.00"])
    );
    assert_eq!(chart["datasets"][0]["data"], serde_json::json!([3, 2, 2, 3]));
    assert_eq!(chart["options"]["yTitle"], "Frequency");
}

#[test]
fn test_end_to_end_stdin_and_tsv() {
    let out = run_csvchart(
        &["bar(x: a, y: b)", "--format", "json"],
        Some("a\tb\nx\t1\ny\t2\n"),
    )
    .unwrap();
    let chart: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(chart["labels"], serde_json::json!(["x", "y"]));

    let chart = run_json("bar(x: a, y: b)", "test/tabbed.tsv");
    assert_eq!(chart["labels"], serde_json::json!([1.0, 3.0]));
}

#[test]
fn test_end_to_end_png_every_kind() {
    for (chart, input) in IMAGE_CASES {
        let out = run_csvchart(&[chart, "--input", input, "--format", "png"], None)
            .unwrap_or_else(|e| panic!("{} failed: {}", chart, e));
        assert!(is_valid_png(&out), "{} did not produce a PNG", chart);
    }
}

#[test]
fn test_end_to_end_svg_every_kind() {
    for (chart, input) in IMAGE_CASES {
        let out = run_csvchart(&[chart, "--input", input, "--format", "svg"], None)
            .unwrap_or_else(|e| panic!("{} failed: {}", chart, e));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<svg"), "{} did not produce an SVG", chart);
    }
}

#[test]
fn test_error_oversized_image() {
    let args = ["bar", "--input", "test/sales.csv", "--width", "70000", "--height", "70000"];
    let err = run_csvchart(&args, None).unwrap_err();
    assert!(err.contains("exceeds"), "stderr: {}", err);
}

#[test]
fn test_error_unsupported_kind() {
    let err = run_csvchart(&["donut(label: region)", "--input", "test/sales.csv"], None)
        .unwrap_err();
    assert!(err.contains("Chart type not supported."), "stderr: {}", err);
}

#[test]
fn test_error_empty_input_reported_before_kind() {
    let err = run_csvchart(&["donut", "--format", "json"], Some("region,sales\n")).unwrap_err();
    assert!(err.contains("Please upload a CSV file first."), "stderr: {}", err);
}

#[test]
fn test_error_empty_input() {
    let err = run_csvchart(&["bar", "--format", "json"], Some("region,sales\n")).unwrap_err();
    assert!(err.contains("Please upload a CSV file first."), "stderr: {}", err);
}

#[test]
fn test_error_unreadable_file() {
    let err = run_csvchart(&["bar", "--input", "test/does-not-exist.csv"], None).unwrap_err();
    assert!(
        err.contains("Error parsing CSV file. Please check the format and try again."),
        "stderr: {}",
        err
    );
}

#[test]
fn test_error_unknown_column() {
    let err = run_csvchart(&["bar(x: region, y: profit)", "--input", "test/sales.csv"], None)
        .unwrap_err();
    assert!(err.contains("Column 'profit' not found"), "stderr: {}", err);
}

#[test]
fn test_list_columns() {
    let out = run_csvchart(&["histogram", "--input", "test/sales.csv", "--columns"], None).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("  region\n"));
    assert!(text.contains("Data Column (data)"));
}
