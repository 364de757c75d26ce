use crate::types::{ConditionTrace, Logic};
use crate::{Answer, Answers, Condition, Operator};

/// Evaluate one condition against the answer it refers to.
///
/// `equals` compares the loose string forms of both sides. The numeric
/// operators require both sides to coerce to finite numbers and are false
/// otherwise. A missing answer matches nothing.
pub(crate) fn eval_condition(condition: &Condition, actual: Option<&Answer>) -> bool {
    let Some(actual) = actual else {
        return false;
    };
    match condition.operator {
        Operator::Equals => actual.coerce_str() == condition.value.coerce_str(),
        Operator::NotEquals => actual.coerce_str() != condition.value.coerce_str(),
        Operator::GreaterThan => compare_numbers(actual, &condition.value, |a, b| a > b),
        Operator::LessThan => compare_numbers(actual, &condition.value, |a, b| a < b),
    }
}

fn compare_numbers(actual: &Answer, expected: &Answer, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (actual.coerce_number(), expected.coerce_number()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Strict left-to-right fold over condition results; no AND-before-OR
/// precedence. `eval` is called once per condition, in order.
pub(crate) fn fold_conditions(
    conditions: &[Condition],
    mut eval: impl FnMut(&Condition) -> bool,
) -> bool {
    let Some((first, rest)) = conditions.split_first() else {
        return false;
    };
    let mut acc = eval(first);
    for condition in rest {
        let result = eval(condition);
        acc = match condition.condition_logic {
            Logic::Or => acc || result,
            Logic::And => acc && result,
        };
    }
    acc
}

pub(crate) fn matches(conditions: &[Condition], answers: &Answers) -> bool {
    fold_conditions(conditions, |c| c.evaluate(answers))
}

/// Same as [`matches`], recording expected vs. actual for every condition.
pub(crate) fn matches_traced(
    conditions: &[Condition],
    answers: &Answers,
) -> (bool, Vec<ConditionTrace>) {
    let mut traces = Vec::with_capacity(conditions.len());
    let matched = fold_conditions(conditions, |c| {
        let actual = answers.get(&c.question_id);
        let result = eval_condition(c, actual);
        traces.push(ConditionTrace {
            question_id: c.question_id.clone(),
            operator: c.operator,
            logic: c.condition_logic,
            expected: c.value.clone(),
            actual: actual.cloned(),
            result,
        });
        result
    });
    (matched, traces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question;

    fn eval(condition: &Condition, answers: &Answers) -> bool {
        condition.evaluate(answers)
    }

    #[test]
    fn equals_is_loose_across_types() {
        let answers = Answers::new().set("n", 5_i64).set("f", 5.0_f64).set("t", "5");
        assert!(eval(&question("n").equals("5"), &answers));
        assert!(eval(&question("f").equals(5_i64), &answers));
        assert!(eval(&question("t").equals(5_i64), &answers));
        assert!(!eval(&question("t").equals("5.0"), &answers));
    }

    #[test]
    fn equals_is_case_sensitive() {
        let answers = Answers::new().set("q", "Yes");
        assert!(eval(&question("q").equals("Yes"), &answers));
        assert!(!eval(&question("q").equals("yes"), &answers));
    }

    #[test]
    fn not_equals_negates() {
        let answers = Answers::new().set("q", "a");
        assert!(eval(&question("q").not_equals("b"), &answers));
        assert!(!eval(&question("q").not_equals("a"), &answers));
    }

    #[test]
    fn multi_select_compares_joined_form() {
        let answers = Answers::new().set("colors", vec!["red", "blue"]);
        assert!(eval(&question("colors").equals("red,blue"), &answers));
        assert!(!eval(&question("colors").equals("red"), &answers));
    }

    #[test]
    fn missing_answer_never_matches() {
        let answers = Answers::new();
        assert!(!eval(&question("q").equals(""), &answers));
        assert!(!eval(&question("q").not_equals("x"), &answers));
        assert!(!eval(&question("q").greater_than(0_i64), &answers));
        assert!(!eval(&question("q").less_than(0_i64), &answers));
    }

    #[test]
    fn numeric_comparisons() {
        let answers = Answers::new().set("age", "42").set("score", 7.5_f64);
        assert!(eval(&question("age").greater_than(18_i64), &answers));
        assert!(!eval(&question("age").less_than(18_i64), &answers));
        assert!(eval(&question("score").less_than("10"), &answers));
        assert!(!eval(&question("score").greater_than(7.5_f64), &answers));
    }

    #[test]
    fn numeric_operator_on_garbage_is_false() {
        let answers = Answers::new().set("age", "abc");
        assert!(!eval(&question("age").greater_than(1_i64), &answers));
        assert!(!eval(&question("age").less_than(1_i64), &answers));

        let answers = Answers::new().set("age", 30_i64);
        assert!(!eval(&question("age").greater_than("old"), &answers));
        assert!(!eval(&question("age").less_than(f64::NAN), &answers));
    }

    #[test]
    fn fold_is_left_to_right() {
        // [A, B(OR), C(AND)] with A=false, B=true, C=false => (false OR true) AND false
        let answers = Answers::new().set("a", "0").set("b", "1").set("c", "0");
        let conditions = vec![
            question("a").equals("1"),
            question("b").equals("1").or(),
            question("c").equals("1"),
        ];
        assert!(!matches(&conditions, &answers));

        // [A(AND), B, C(OR)] with A=true, B=false, C=true => (true AND false) OR true
        let conditions = vec![
            question("b").equals("1"),
            question("a").equals("1"),
            question("b").equals("1").or(),
        ];
        assert!(matches(&conditions, &answers));
    }

    #[test]
    fn first_condition_logic_is_ignored() {
        let answers = Answers::new().set("a", "1");
        let conditions = vec![question("a").equals("1").or()];
        assert!(matches(&conditions, &answers));
    }

    #[test]
    fn empty_conditions_are_false() {
        assert!(!matches(&[], &Answers::new()));
    }

    #[test]
    fn traced_records_every_condition() {
        let answers = Answers::new().set("a", "x");
        let conditions = vec![question("a").equals("x"), question("b").equals("y")];
        let (matched, traces) = matches_traced(&conditions, &answers);
        assert!(!matched);
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].actual, Some(Answer::from("x")));
        assert!(traces[0].result);
        assert_eq!(traces[1].actual, None);
        assert!(!traces[1].result);
        assert_eq!(traces[1].expected, Answer::from("y"));
    }
}
