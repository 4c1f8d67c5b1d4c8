use serde_json::Value;
use tokio::io::{BufReader, BufWriter};
use unit_obfuscator::{obfuscate, Obfuscator, OutputFormat};

#[tokio::test]
async fn obfuscates_stream_line_by_line() {
    let obfuscator = Obfuscator::default();
    let input = "1 meter\n\n1 widget\nx\n";
    let reader = BufReader::new(input.as_bytes());
    let mut output: Vec<u8> = Vec::new();
    let summary = {
        let writer = BufWriter::new(&mut output);
        obfuscator.obfuscate_stream(reader, writer, OutputFormat::Text).await.unwrap()
    };

    assert_eq!(summary.lines, 4);
    assert_eq!(summary.obfuscated, 2);
    assert_eq!(summary.degraded, 1);
    assert_eq!(summary.rejected, 1);

    let out_str = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = out_str.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], obfuscate("1 meter").unwrap());
    assert_eq!(lines[1], "");
    assert!(lines[2].contains("firkin widget per"));
    assert_eq!(lines[3], "x");
}

#[tokio::test]
async fn json_output_has_one_record_per_line() {
    let obfuscator = Obfuscator::default();
    let input = "2 liters\n\nq\n";
    let reader = BufReader::new(input.as_bytes());
    let mut output: Vec<u8> = Vec::new();
    obfuscator
        .obfuscate_stream(reader, &mut output, OutputFormat::Json)
        .await
        .unwrap();

    let records: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["input"], "2 liters");
    assert_eq!(records[0]["numerator"], "square hogshead firkin puncheon");
    assert_eq!(records[0]["applied"][0], "liter");
    assert_eq!(records[0]["output"], obfuscate("2 liters").unwrap());
    assert_eq!(records[1]["input"], "q");
    assert!(records[1]["error"].as_str().unwrap().contains("invalid input"));
}
