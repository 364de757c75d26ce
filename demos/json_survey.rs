use waypoint::{Answers, Position, RuleSet, SkipSet};

const DOCUMENT: &str = r#"{
  "blocks": [
    { "id": "household", "title": "Household", "order": 1, "questionIds": ["size", "owns_car"] },
    { "id": "commute", "title": "Commute", "order": 2, "questionIds": ["distance", "mode"] },
    { "id": "closing", "title": "Closing", "order": 3, "questionIds": ["feedback"] }
  ],
  "rules": [
    {
      "id": "no_car",
      "blockId": "household",
      "priority": 1,
      "conditions": [
        { "questionId": "owns_car", "operator": "equals", "value": "no" },
        { "questionId": "size", "operator": "greater_than", "value": 4, "conditionLogic": "AND" }
      ],
      "actions": [
        { "type": "show_message", "message": "Large household without a car" },
        { "type": "goto_block_question", "targetBlockId": "commute", "targetQuestionId": "mode" }
      ]
    },
    {
      "id": "typo",
      "blockId": "household",
      "priority": "2",
      "conditions": [{ "questionId": "owns_car", "operator": "equals", "value": "yes" }],
      "actions": [{ "type": "goto_block", "blockId": "comute" }]
    },
    {
      "id": "stale",
      "blockId": "retired_block",
      "conditions": [{ "questionId": "size", "operator": "less_than", "value": 1 }],
      "actions": [{ "type": "end" }]
    }
  ]
}"#;

fn main() {
    let ruleset = RuleSet::from_json(DOCUMENT).expect("failed to load survey document");
    println!("{ruleset}");

    for issue in ruleset.lint() {
        println!("lint: {issue}");
    }

    let position = Position::question("household", "owns_car");
    for answers in [
        Answers::new().set("size", "6").set("owns_car", "no"),
        Answers::new().set("size", "2").set("owns_car", "yes"),
        Answers::new().set("size", "2").set("owns_car", "no"),
    ] {
        let report = ruleset.next_target_detailed(&position, &answers, &SkipSet::new());
        println!();
        println!("{report}");
        if let Some(err) = report.navigation().invalid_target() {
            println!("invalid target: {err}");
        }
        for message in report.navigation().messages() {
            println!("message: {message}");
        }
    }
}
