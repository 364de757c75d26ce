use waypoint::{
    Action, Answer, Answers, Block, Condition, Navigation, NavigationTarget, Operator, Position,
    Rule, RuleSet, RuleSetBuilder, SkipSet, Survey, next_block, question, select_applicable,
};

fn survey() -> Survey {
    Survey::new(vec![
        Block::new("B1", 1, ["q1", "q2"]),
        Block::new("B2", 2, ["q3"]),
        Block::new("B3", 3, ["q4"]),
    ])
}

fn navigate(ruleset: &RuleSet, position: &Position, answers: &Answers) -> Navigation {
    ruleset.next_target(position, answers, &SkipSet::new())
}

#[test]
fn empty_survey_ends_immediately() {
    let ruleset = RuleSetBuilder::new().build(Survey::default());
    let nav = navigate(&ruleset, &Position::block("anything"), &Answers::new());
    assert_eq!(nav.target(), &NavigationTarget::End);
}

#[test]
fn single_block_survey() {
    let ruleset = RuleSetBuilder::new().build(Survey::new(vec![Block::new("only", 0, ["q1"])]));
    let nav = navigate(&ruleset, &Position::question("only", "q1"), &Answers::new());
    assert_eq!(nav.target(), &NavigationTarget::End);
}

#[test]
fn block_without_questions_is_still_a_target() {
    let ruleset = RuleSetBuilder::new().build(Survey::new(vec![
        Block::new("B1", 0, ["q1"]),
        Block::new("interlude", 1, Vec::<&str>::new()),
        Block::new("B2", 2, ["q2"]),
    ]));
    let nav = navigate(&ruleset, &Position::question("B1", "q1"), &Answers::new());
    assert_eq!(nav.target(), &NavigationTarget::block("interlude"));
    let nav = navigate(&ruleset, &Position::block("interlude"), &Answers::new());
    assert_eq!(nav.target(), &NavigationTarget::block("B2"));
}

#[test]
fn rule_without_conditions_never_fires() {
    let ruleset = RuleSetBuilder::new()
        .rule("blank", "B1", |r| r.then(Action::End))
        .build(survey());
    let nav = navigate(&ruleset, &Position::block("B1"), &Answers::new().set("q1", "x"));
    assert_eq!(nav.fired_rule(), None);
    assert_eq!(nav.target(), &NavigationTarget::block("B2"));
}

#[test]
fn rule_without_actions_fires_and_falls_back() {
    let ruleset = RuleSetBuilder::new()
        .rule("inert", "B1", |r| r.when(question("q1").equals("x")))
        .build(survey());
    let nav = navigate(&ruleset, &Position::block("B1"), &Answers::new().set("q1", "x"));
    assert_eq!(nav.fired_rule(), Some("inert"));
    assert_eq!(nav.target(), &NavigationTarget::block("B2"));
}

#[test]
fn message_only_rule_keeps_linear_progression() {
    let ruleset = RuleSetBuilder::new()
        .rule("hello", "B1", |r| {
            r.when(question("q1").equals("x"))
                .then(Action::show_message("Thanks!"))
        })
        .build(survey());
    let nav = navigate(&ruleset, &Position::question("B1", "q1"), &Answers::new().set("q1", "x"));
    assert_eq!(nav.target(), &NavigationTarget::question("B1", "q2"));
    assert_eq!(nav.messages(), &["Thanks!"]);
}

#[test]
fn rules_of_other_blocks_do_not_apply() {
    let ruleset = RuleSetBuilder::new()
        .rule("elsewhere", "B2", |r| r.when(question("q1").equals("x")).then(Action::End))
        .build(survey());
    let nav = navigate(&ruleset, &Position::block("B1"), &Answers::new().set("q1", "x"));
    assert_eq!(nav.target(), &NavigationTarget::block("B2"));
}

#[test]
fn conditions_may_read_answers_from_earlier_blocks() {
    let ruleset = RuleSetBuilder::new()
        .rule("recall", "B2", |r| {
            r.when(question("q1").equals("vip")).then(Action::End)
        })
        .build(survey());
    let nav = navigate(&ruleset, &Position::block("B2"), &Answers::new().set("q1", "vip"));
    assert_eq!(nav.target(), &NavigationTarget::End);
}

#[test]
fn empty_string_answer_matches_empty_expected() {
    let answers = Answers::new().set("q1", "");
    assert!(question("q1").equals("").evaluate(&answers));
    assert!(!question("q1").equals("").evaluate(&Answers::new()));
}

#[test]
fn mixed_number_representations() {
    let answers = Answers::new().set("rating", "4");
    assert!(Condition::new("rating", Operator::Equals, 4_i64).evaluate(&answers));
    assert!(Condition::new("rating", Operator::GreaterThan, 3.5_f64).evaluate(&answers));
    assert!(Condition::new("rating", Operator::LessThan, "10").evaluate(&answers));
}

#[test]
fn multi_select_numeric_comparison_is_false() {
    let answers = Answers::new().set("picks", Answer::from(vec![5_i64]));
    assert!(!question("picks").greater_than(1_i64).evaluate(&answers));
    assert!(question("picks").equals("5").evaluate(&answers));
}

#[test]
fn negative_priorities_sort_first() {
    let mut early = Rule::new("early", "B1");
    early.priority = -5;
    let late = Rule::new("late", "B1");
    let rules = vec![late, early];
    let ids: Vec<&str> = select_applicable(&rules, "B1")
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["early", "late"]);
}

#[test]
fn next_block_free_function() {
    let order: Vec<String> = ["B1", "B2", "B3"].iter().map(|s| (*s).to_owned()).collect();
    assert_eq!(next_block("B2", &order), Some("B3"));
    assert_eq!(next_block("B3", &order), None);
    assert_eq!(next_block("missing", &order), None);
}

#[test]
fn many_rules_in_one_block() {
    let mut builder = RuleSetBuilder::new();
    for i in 0..100_i64 {
        let value = i.to_string();
        builder = builder.rule(&format!("r{i}"), "B1", move |r| {
            r.priority(100 - i)
                .when(question("q1").equals(value.as_str()))
                .then(Action::goto_block("B3"))
        });
    }
    let ruleset = builder.build(survey());

    let nav = navigate(&ruleset, &Position::block("B1"), &Answers::new().set("q1", "42"));
    assert_eq!(nav.fired_rule(), Some("r42"));
    assert_eq!(nav.target(), &NavigationTarget::block("B3"));
}
