use clap::Parser;
use prd_template::table::Column;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Map, Value, json};
use std::fs;

/// A CLI tool to generate synthetic PRD QC tables for the transformer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON records to
    #[arg(short, long, default_value = "generated_prd_qc.json")]
    output: String,

    /// Number of question/response turns to generate
    #[arg(long, default_value_t = 5)]
    turns: usize,

    /// Maximum number of intents answered in each turn
    #[arg(long, default_value_t = 3)]
    max_intents: usize,

    /// Maximum loop count per intent
    #[arg(long, default_value_t = 2)]
    max_loops: u32,
}

const INTENTS: [&str; 6] = ["affirm", "decline", "ask_again", "greeting", "fallback", "silence"];
const MOODS: [&str; 4] = ["Happy", "Curious", "Calm", "Excited"];
const SERVOS: [&str; 3] = ["Wave", "Nod", "Tilt"];
const EXAMPLES: [&str; 4] = [
    "\"có\", \"được\", \"ok\"",
    "không, chưa, không muốn",
    "mình không biết",
    "\"xin chào\", \"chào bạn\"",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.max_intents == 0 || cli.max_loops == 0 {
        eprintln!("Error: --max-intents and --max-loops must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating a PRD QC table ({} turns, up to {} intents x {} loops per turn)...",
        cli.turns, cli.max_intents, cli.max_loops
    );

    let mut rows = Vec::new();
    for turn in 0..cli.turns {
        rows.extend(generate_question_block(&mut rng, turn));
        rows.extend(generate_responses(&mut rng, turn, cli.max_intents, cli.max_loops));
    }
    rows.extend(generate_question_block(&mut rng, cli.turns));

    let json_output = serde_json::to_string_pretty(&rows)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} rows and saved them to '{}'",
        rows.len(),
        cli.output
    );

    Ok(())
}

/// A record with every required column present and null.
fn empty_record() -> Map<String, Value> {
    Column::ALL
        .iter()
        .map(|c| (c.name().to_string(), Value::Null))
        .collect()
}

fn generate_question_block(rng: &mut ThreadRng, turn: usize) -> Vec<Map<String, Value>> {
    let lines = rng.random_range(1..=3);
    (0..lines)
        .map(|line| {
            let mut record = empty_record();
            record.insert("Section".into(), json!("Question"));
            record.insert(
                "Text_Vietnamese".into(),
                json!(format!("Câu hỏi {} - dòng {}", turn + 1, line + 1)),
            );
            decorate(rng, &mut record);
            if line == 0 && rng.random_bool(0.5) {
                record.insert("Button".into(), json!(format!("btn_turn_{}", turn + 1)));
                record.insert(
                    "Image_Listening".into(),
                    json!(format!("listening_{}.gif", turn + 1)),
                );
            }
            record
        })
        .collect()
}

fn generate_responses(
    rng: &mut ThreadRng,
    turn: usize,
    max_intents: usize,
    max_loops: u32,
) -> Vec<Map<String, Value>> {
    let intent_count = rng.random_range(1..=max_intents.min(INTENTS.len()));
    let mut records = Vec::new();
    for intent in INTENTS.iter().take(intent_count) {
        let loops = rng.random_range(1..=max_loops);
        let examples = EXAMPLES[rng.random_range(0..EXAMPLES.len())];
        for loop_count in 1..=loops {
            for line in 0..rng.random_range(1..=2) {
                let mut record = empty_record();
                record.insert("Section".into(), json!("Intent_Response"));
                record.insert("Intent".into(), json!(intent));
                record.insert("Loop".into(), json!(loop_count));
                record.insert(
                    "Text_Vietnamese".into(),
                    json!(format!(
                        "Trả lời {} (lượt {}, vòng {}, dòng {})",
                        intent,
                        turn + 1,
                        loop_count,
                        line + 1
                    )),
                );
                record.insert("User_Examples".into(), json!(examples));
                decorate(rng, &mut record);
                records.push(record);
            }
        }
    }
    records
}

/// Randomly fills the presentation columns of a record.
fn decorate(rng: &mut ThreadRng, record: &mut Map<String, Value>) {
    if rng.random_bool(0.6) {
        record.insert("Mood".into(), json!(MOODS[rng.random_range(0..MOODS.len())]));
        record.insert("Servo_Name".into(), json!(SERVOS[rng.random_range(0..SERVOS.len())]));
        if rng.random_bool(0.5) {
            record.insert("Servo_Duration".into(), json!(rng.random_range(500.0..3000.0_f64).round()));
        }
    }
    if rng.random_bool(0.3) {
        record.insert("Image".into(), json!(format!("scene_{}.jpg", rng.random_range(1..100))));
    }
    if rng.random_bool(0.3) {
        record.insert("Voice_Speed".into(), json!(rng.random_range(0.8..1.3_f64)));
    }
}
