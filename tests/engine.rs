//! Tests for the transformation engine: row grouping, loops and stitching.
mod common;
use common::*;
use prd_template::description::FALLBACK_DESCRIPTION;
use prd_template::prelude::*;

#[test]
fn test_dialogue_produces_expected_row_shapes() {
    let rows = transform(&create_dialogue_table()).expect("Failed to transform dialogue");

    assert_eq!(rows.len(), 7);
    let kinds: Vec<_> = rows
        .iter()
        .map(|r| match (&r.question, &r.intent_name) {
            (Some(_), None) => "Q".to_string(),
            (None, Some(name)) => format!("{}:{}", name, r.loop_count.unwrap()),
            _ => panic!("unexpected row shape: {:?}", r),
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["Q", "greeting:1", "greeting:2", "fallback:1", "silence:1", "Q", "color:1"]
    );
}

#[test]
fn test_every_row_has_exactly_one_utterance_column() {
    let rows = transform(&create_dialogue_table()).unwrap();
    for row in &rows {
        assert!(
            row.question.is_some() ^ row.response_1.is_some(),
            "row must carry exactly one of QUESTION / RESPONSE_1: {:?}",
            row
        );
    }
}

#[test]
fn test_question_row_collects_block_and_first_wins_columns() {
    let rows = transform(&create_dialogue_table()).unwrap();
    let question = &rows[0];

    assert_eq!(
        utterance_texts(question.question.as_ref()),
        vec!["Xin chào! Bạn tên gì?", "Mình là robot."]
    );
    assert_eq!(question.button.as_deref(), Some("btn_name"));
    assert_eq!(question.image_listening.as_deref(), Some("listen.gif"));
    assert_eq!(question.audio_listening, None);
    assert_eq!(question.max_loop, Some(2));
    assert_eq!(question.intent_name, None);
    assert_eq!(question.intent_description, None);
    assert_eq!(question.loop_count, None);
    assert_eq!(question.response_1, None);
}

#[test]
fn test_terminal_loop_is_stitched_to_next_question() {
    let rows = transform(&create_dialogue_table()).unwrap();

    // greeting loop 1 is not the turn's last loop
    assert_eq!(utterance_texts(rows[1].response_1.as_ref()), vec!["Chào bạn!"]);
    // greeting loop 2 continues into the next question
    assert_eq!(
        utterance_texts(rows[2].response_1.as_ref()),
        vec!["Rất vui được gặp bạn.", "Bạn thích màu gì?"]
    );
    assert_eq!(
        utterance_texts(rows[3].response_1.as_ref()),
        vec!["Mình chưa hiểu.", "Bạn thích màu gì?"]
    );
    assert_eq!(
        utterance_texts(rows[4].response_1.as_ref()),
        vec!["Bạn còn đó không?", "Bạn thích màu gì?"]
    );
}

#[test]
fn test_final_turn_has_nothing_to_stitch() {
    let rows = transform(&create_dialogue_table()).unwrap();
    let color = &rows[6];
    assert_eq!(utterance_texts(color.response_1.as_ref()), vec!["Màu đẹp quá!"]);
    assert_eq!(color.intent_description.as_deref(), Some("xanh"));
    assert_eq!(color.max_loop, None);
}

#[test]
fn test_intent_names_and_descriptions() {
    let rows = transform(&create_dialogue_table()).unwrap();

    assert_eq!(rows[1].intent_name.as_deref(), Some("greeting"));
    assert_eq!(
        rows[1].intent_description.as_deref(),
        Some("user say something like \"xin chào\"")
    );
    // examples only appear on the loop 1 row
    assert_eq!(rows[2].intent_description, None);

    assert_eq!(rows[3].intent_name.as_deref(), Some("fallback"));
    assert_eq!(rows[3].intent_description.as_deref(), Some(FALLBACK_DESCRIPTION));

    assert_eq!(rows[4].intent_name.as_deref(), Some("silence"));
    assert_eq!(rows[4].intent_description, None);
}

#[test]
fn test_mixed_case_custom_intent_keeps_its_spelling() {
    let table = table_from_script(&["Q", "AskAgain:1", "Q"]);
    let rows = transform(&table).unwrap();
    assert_eq!(rows[1].intent_name.as_deref(), Some("AskAgain"));
}

#[test]
fn test_max_loop_is_scoped_to_the_turn() {
    // affirm reaches loop 3 in the first turn but only loop 1 in the second
    let table = table_from_script(&[
        "Q", "affirm:1", "affirm:2", "affirm:3", "Q", "affirm:1", "Q",
    ]);
    let rows = transform(&table).unwrap();

    let second_turn_affirm = &rows[5];
    assert_eq!(second_turn_affirm.loop_count, Some(1));
    assert_eq!(
        utterance_texts(second_turn_affirm.response_1.as_ref()),
        vec!["r5", "q6"]
    );

    let first_turn: Vec<_> = rows[1..4]
        .iter()
        .map(|r| utterance_texts(r.response_1.as_ref()).len())
        .collect();
    assert_eq!(first_turn, vec![1, 1, 2]);
}

#[test]
fn test_tied_terminal_loops_each_stitch_once() {
    // the same intent appears in two runs of one turn, both at the max loop
    let table = table_from_script(&["Q", "yes:1", "yes:2", "no:1", "yes:2", "Q"]);
    let rows = transform(&table).unwrap();

    let texts: Vec<Vec<String>> = rows
        .iter()
        .filter(|r| r.is_intent())
        .map(|r| utterance_texts(r.response_1.as_ref()))
        .collect();
    assert_eq!(
        texts,
        vec![
            vec!["r1".to_string()],
            vec!["r2".to_string(), "q5".to_string()],
            vec!["r3".to_string(), "q5".to_string()],
            vec!["r4".to_string(), "q5".to_string()],
        ]
    );
}

#[test]
fn test_loop_rows_are_grouped_within_a_run() {
    let table = table_from_script(&["Q", "ask:1", "ask:1", "ask:2", "ask:1", "Q"]);
    let rows = transform(&table).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1].loop_count, Some(1));
    assert_eq!(
        utterance_texts(rows[1].response_1.as_ref()),
        vec!["r1", "r2", "r4"]
    );
    assert_eq!(rows[2].loop_count, Some(2));
    assert_eq!(utterance_texts(rows[2].response_1.as_ref()), vec!["r3", "q5"]);
}

#[test]
fn test_responses_before_the_first_question_stitch_into_it() {
    let table = table_from_script(&["intro:1", "Q", "bye:1"]);
    let rows = transform(&table).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(utterance_texts(rows[0].response_1.as_ref()), vec!["r0", "q1"]);
    assert!(rows[1].is_question());
    assert_eq!(utterance_texts(rows[2].response_1.as_ref()), vec!["r2"]);
}

#[test]
fn test_loop_zero_never_stitches() {
    let table = table_from_script(&["Q", "idle:0", "Q"]);
    let rows = transform(&table).unwrap();
    assert_eq!(rows[1].loop_count, Some(0));
    assert_eq!(utterance_texts(rows[1].response_1.as_ref()), vec!["r1"]);
}

#[test]
fn test_other_sections_are_skipped_and_split_runs() {
    let table = table_from_script(&["-", "Q", "-", "yes:1", "-", "yes:1", "Q", "-"]);
    let rows = transform(&table).unwrap();

    assert_eq!(rows.len(), 4);
    assert!(rows[0].is_question());
    // both runs of yes:1 sit in the same turn and are terminal
    assert_eq!(utterance_texts(rows[1].response_1.as_ref()), vec!["r3", "q6"]);
    assert_eq!(utterance_texts(rows[2].response_1.as_ref()), vec!["r5", "q6"]);
    assert!(rows[3].is_question());
}

#[test]
fn test_row_without_loop_forms_its_own_group() {
    let mut table_rows: Vec<InputRow> = table_from_script(&["Q", "ask:1", "ask:1", "Q"])
        .iter()
        .cloned()
        .collect();
    table_rows[2].loop_count = None;
    let table: RowTable = table_rows.into_iter().collect();
    let rows = transform(&table).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1].loop_count, Some(1));
    assert_eq!(utterance_texts(rows[1].response_1.as_ref()), vec!["r1", "q3"]);
    assert_eq!(rows[2].loop_count, None);
    assert_eq!(utterance_texts(rows[2].response_1.as_ref()), vec!["r2"]);
}

#[test]
fn test_listening_and_examples_are_first_non_empty_per_loop() {
    let table: RowTable = vec![
        InputRow::question("q"),
        InputRow::response("ask", 1, "a").with_button(""),
        InputRow::response("ask", 1, "b")
            .with_button("btn_b")
            .with_user_examples("   ")
            .with_listening(None, Some("ear.mp3")),
        InputRow::response("ask", 1, "c")
            .with_button("btn_c")
            .with_user_examples("maybe")
            .with_listening(Some("eye.gif"), Some("ignored.mp3")),
    ]
    .into_iter()
    .collect();

    let rows = transform(&table).unwrap();
    let ask = &rows[1];
    assert_eq!(ask.button.as_deref(), Some("btn_b"));
    assert_eq!(ask.audio_listening.as_deref(), Some("ear.mp3"));
    assert_eq!(ask.image_listening.as_deref(), Some("eye.gif"));
    // "   " is non-empty, so it wins and produces no description
    assert_eq!(ask.intent_description, None);
}

#[test]
fn test_empty_input_is_rejected() {
    let result = transform(&RowTable::default());
    assert!(matches!(result, Err(TransformError::EmptyResult)));

    let only_notes = table_from_script(&["-", "-"]);
    assert!(matches!(
        transform(&only_notes),
        Err(TransformError::EmptyResult)
    ));
}

#[test]
fn test_bad_image_refuses_the_result() {
    let table: RowTable = vec![
        InputRow::question("q").with_image("my photo.jpg"),
        InputRow::response("ok", 1, "r").with_image("scene.png"),
    ]
    .into_iter()
    .collect();

    match transform(&table) {
        Err(TransformError::ImageLinks(violations)) => {
            let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
            assert_eq!(
                messages,
                vec![
                    "Row 1 (QUESTION, item 1): Image name contains spaces: my photo.jpg",
                    "Row 2 (RESPONSE_1, item 1): Image name must end with .jpg or .gif: scene.png",
                ]
            );
        }
        other => panic!("Expected image link violations, got {:?}", other),
    }
}

#[test]
fn test_engine_configuration() {
    let table: RowTable = vec![
        InputRow::question("q").with_image("scene.png"),
        InputRow::response("ok", 1, "r"),
    ]
    .into_iter()
    .collect();

    let engine = TransformEngine::builder()
        .question_max_loop(5)
        .validator(ImageLinkValidator::new().with_extension("png"))
        .build();
    let rows = engine.transform(&table).expect("png should be accepted");
    assert_eq!(rows[0].max_loop, Some(5));
}

#[test]
fn test_strict_mode_refuses_field_errors() {
    let json = json_records(&[
        serde_json::json!({"Section": "Question", "Text_Vietnamese": "q", "Voice_Speed": "fast"}),
        serde_json::json!({"Section": "Intent_Response", "Intent": "ok", "Loop": 1}),
    ]);
    let loaded = TableLoader::new().load(JsonRecords::new(&json)).unwrap();
    assert_eq!(loaded.field_errors.len(), 1);

    let lenient = TransformEngine::default()
        .transform_loaded(loaded.clone())
        .expect("lenient mode keeps going");
    assert_eq!(lenient.rows.len(), 2);
    assert_eq!(lenient.field_errors.len(), 1);

    let strict = TransformEngine::builder().strict_fields(true).build();
    match strict.transform_loaded(loaded) {
        Err(TransformError::MalformedFields(errors)) => {
            assert_eq!(errors[0].column, "Voice_Speed");
            assert_eq!(errors[0].row, 1);
        }
        other => panic!("Expected malformed fields, got {:?}", other),
    }
}

#[test]
fn test_graph_edges_match_stitched_rows() {
    let engine = TransformEngine::default();
    let graph = engine.build_graph(&create_dialogue_table());

    assert_eq!(graph.questions.len(), 2);
    assert_eq!(graph.responses.len(), 5);

    let edges: Vec<_> = graph
        .edges()
        .map(|(response, question)| {
            (
                response.intent.clone().unwrap(),
                response.loop_count.unwrap(),
                question.block.start,
            )
        })
        .collect();
    assert_eq!(
        edges,
        vec![
            ("greeting".to_string(), 2, 6),
            ("Fallback".to_string(), 1, 6),
            ("SILENCE".to_string(), 1, 6),
        ]
    );

    let color = &graph.responses[4];
    assert_eq!(color.next_question, None);
    assert!(color.is_terminal());
    assert_eq!(color.leads_to(), None);
}
