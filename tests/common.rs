//! Common test utilities for building PRD QC tables.
use prd_template::prelude::*;
use serde_json::Value;

/// A two-turn dialogue exercising question grouping, loops and stitching.
///
/// ```text
/// 0  Question         "Xin chào! Bạn tên gì?"   (Happy/Wave, button)
/// 1  Question         "Mình là robot."          (image, listening gif)
/// 2  Intent_Response  greeting  loop 1          (quoted examples)
/// 3  Intent_Response  greeting  loop 2
/// 4  Intent_Response  Fallback  loop 1
/// 5  Intent_Response  SILENCE   loop 1
/// 6  Question         "Bạn thích màu gì?"
/// 7  Intent_Response  color     loop 1          (single example)
/// ```
#[allow(dead_code)]
pub fn create_dialogue_table() -> RowTable {
    vec![
        InputRow::question("Xin chào! Bạn tên gì?")
            .with_mood("Happy")
            .with_servo("Wave", None)
            .with_button("btn_name"),
        InputRow::question("Mình là robot.")
            .with_image("robot.jpg")
            .with_listening(Some("listen.gif"), None),
        InputRow::response("greeting", 1, "Chào bạn!")
            .with_user_examples("\"xin chào\", \"chào bạn\", \"hello\""),
        InputRow::response("greeting", 2, "Rất vui được gặp bạn."),
        InputRow::response("Fallback", 1, "Mình chưa hiểu."),
        InputRow::response("SILENCE", 1, "Bạn còn đó không?"),
        InputRow::question("Bạn thích màu gì?"),
        InputRow::response("color", 1, "Màu đẹp quá!").with_user_examples("xanh"),
    ]
    .into_iter()
    .collect()
}

/// A table whose sections are given as a compact script: `Q` for a question row,
/// `intent:loop` for a response row and `-` for a row with any other section.
#[allow(dead_code)]
pub fn table_from_script(script: &[&str]) -> RowTable {
    script
        .iter()
        .enumerate()
        .map(|(index, entry)| match *entry {
            "Q" => InputRow::question(&format!("q{}", index)),
            "-" => InputRow {
                section: Section::Other("Note".to_string()),
                text: Some(format!("note{}", index)),
                ..Default::default()
            },
            response => {
                let (intent, loop_count) = response
                    .split_once(':')
                    .expect("response entries are written as intent:loop");
                InputRow::response(
                    intent,
                    loop_count.parse().expect("loop must be a number"),
                    &format!("r{}", index),
                )
            }
        })
        .collect()
}

/// Parses a `QUESTION`/`RESPONSE_1` cell and returns the `text` of every utterance.
#[allow(dead_code)]
pub fn utterance_texts(cell: Option<&String>) -> Vec<String> {
    let cell = cell.expect("cell should be populated");
    let items: Vec<Value> = serde_json::from_str(cell).expect("cell should hold a JSON array");
    items
        .iter()
        .map(|item| item["text"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// A JSON records document carrying every required column, with `overrides` applied
/// to each record in turn.
#[allow(dead_code)]
pub fn json_records(overrides: &[Value]) -> String {
    let records: Vec<Value> = overrides
        .iter()
        .map(|override_value| {
            let mut record = serde_json::Map::new();
            for column in Column::ALL {
                record.insert(column.name().to_string(), Value::Null);
            }
            if let Value::Object(fields) = override_value {
                for (key, value) in fields {
                    record.insert(key.clone(), value.clone());
                }
            }
            Value::Object(record)
        })
        .collect();
    serde_json::to_string(&records).expect("records serialize")
}
