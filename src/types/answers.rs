use std::collections::HashMap;

use super::Answer;

/// The respondent's current answers, keyed by question id.
///
/// Supplied fresh for every navigation decision; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Answers {
    data: HashMap<String, Answer>,
}

impl Answers {
    /// Create an empty answer map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer for a question, returning the updated map.
    #[must_use]
    pub fn set(mut self, question_id: &str, answer: impl Into<Answer>) -> Self {
        self.insert(question_id, answer.into());
        self
    }

    /// Set the answer for a question (mutable reference version).
    pub fn insert(&mut self, question_id: &str, answer: Answer) {
        self.data.insert(question_id.to_owned(), answer);
    }

    /// Clear a question's answer, returning the previous one.
    pub fn remove(&mut self, question_id: &str) -> Option<Answer> {
        self.data.remove(question_id)
    }

    #[must_use]
    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.data.get(question_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Into<String>, V: Into<Answer>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let answers = Answers::new().set("q1", "yes").set("q2", 4_i64);
        assert_eq!(answers.get("q1"), Some(&Answer::from("yes")));
        assert_eq!(answers.get("q2"), Some(&Answer::Int(4)));
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn get_missing_returns_none() {
        let answers = Answers::new().set("q1", "yes");
        assert_eq!(answers.get("q9"), None);
        assert!(Answers::new().is_empty());
    }

    #[test]
    fn overwrite_and_remove() {
        let mut answers = Answers::new().set("q1", 1_i64).set("q1", 2_i64);
        assert_eq!(answers.get("q1"), Some(&Answer::Int(2)));
        assert_eq!(answers.remove("q1"), Some(Answer::Int(2)));
        assert_eq!(answers.get("q1"), None);
    }

    #[test]
    fn collect_from_pairs() {
        let answers: Answers = [("q1", "a"), ("q2", "b")].into_iter().collect();
        assert_eq!(answers.get("q2"), Some(&Answer::from("b")));
    }
}
