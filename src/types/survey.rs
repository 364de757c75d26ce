use std::collections::HashMap;

/// An ordered group of questions; the unit of scope for branching rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Block {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    /// Position in the linear fallback sequence.
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub question_ids: Vec<String>,
}

impl Block {
    pub fn new<'a>(
        id: &str,
        order: i64,
        question_ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            id: id.to_owned(),
            title: String::new(),
            order,
            question_ids: question_ids.into_iter().map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }
}

/// The block layout of a survey: the linear block order plus the ordered
/// questions of each block.
///
/// Blocks are sorted by [`Block::order`]; ties keep the order they were
/// given in. A duplicated block id keeps its first occurrence.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    blocks: Vec<Block>,
    order: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Survey {
    #[must_use]
    pub fn new(mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(|b| b.order);
        let mut positions = HashMap::with_capacity(blocks.len());
        let mut kept = Vec::with_capacity(blocks.len());
        for block in blocks {
            if positions.contains_key(&block.id) {
                continue;
            }
            positions.insert(block.id.clone(), kept.len());
            kept.push(block);
        }
        let order = kept.iter().map(|b| b.id.clone()).collect();
        Self {
            blocks: kept,
            order,
            positions,
        }
    }

    /// Build a layout from an explicit block order and per-block question
    /// lists. Blocks without an entry in `questions_by_block` are empty.
    #[must_use]
    pub fn from_order<'a>(
        block_order: impl IntoIterator<Item = &'a str>,
        questions_by_block: &HashMap<String, Vec<String>>,
    ) -> Self {
        let blocks = block_order
            .into_iter()
            .enumerate()
            .map(|(i, id)| Block {
                id: id.to_owned(),
                title: String::new(),
                order: i64::try_from(i).unwrap_or(i64::MAX),
                question_ids: questions_by_block.get(id).cloned().unwrap_or_default(),
            })
            .collect();
        Self::new(blocks)
    }

    /// Block ids in linear order.
    #[must_use]
    pub fn block_order(&self) -> &[String] {
        &self.order
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.positions.get(block_id).map(|&i| &self.blocks[i])
    }

    #[must_use]
    pub fn contains_block(&self, block_id: &str) -> bool {
        self.positions.contains_key(block_id)
    }

    /// Ordered question ids of a block; empty for unknown blocks.
    #[must_use]
    pub fn questions(&self, block_id: &str) -> &[String] {
        self.block(block_id)
            .map(|b| b.question_ids.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn block_has_question(&self, block_id: &str, question_id: &str) -> bool {
        self.questions(block_id).iter().any(|q| q == question_id)
    }

    /// The block following `block_id` in linear order.
    #[must_use]
    pub fn next_block(&self, block_id: &str) -> Option<&str> {
        crate::navigate::next_block(block_id, &self.order)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey() -> Survey {
        Survey::new(vec![
            Block::new("B3", 3, ["q5"]),
            Block::new("B1", 1, ["q1", "q2"]),
            Block::new("B2", 2, ["q3", "q4"]),
        ])
    }

    #[test]
    fn blocks_sorted_by_order() {
        assert_eq!(survey().block_order(), &["B1", "B2", "B3"]);
    }

    #[test]
    fn equal_order_keeps_insertion() {
        let s = Survey::new(vec![
            Block::new("X", 0, Vec::<&str>::new()),
            Block::new("A", 0, Vec::<&str>::new()),
            Block::new("M", 0, Vec::<&str>::new()),
        ]);
        assert_eq!(s.block_order(), &["X", "A", "M"]);
    }

    #[test]
    fn duplicate_block_keeps_first() {
        let s = Survey::new(vec![Block::new("B1", 0, ["q1"]), Block::new("B1", 1, ["q9"])]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.questions("B1"), &["q1"]);
    }

    #[test]
    fn question_lookup() {
        let s = survey();
        assert_eq!(s.questions("B2"), &["q3", "q4"]);
        assert!(s.questions("nope").is_empty());
        assert!(s.block_has_question("B1", "q2"));
        assert!(!s.block_has_question("B1", "q3"));
        assert!(s.contains_block("B3"));
        assert!(!s.contains_block("B4"));
    }

    #[test]
    fn next_block_positional() {
        let s = survey();
        assert_eq!(s.next_block("B1"), Some("B2"));
        assert_eq!(s.next_block("B3"), None);
        assert_eq!(s.next_block("missing"), None);
    }

    #[test]
    fn from_order_uses_given_sequence() {
        let mut questions = HashMap::new();
        questions.insert("B2".to_owned(), vec!["q3".to_owned()]);
        let s = Survey::from_order(["B2", "B1"], &questions);
        assert_eq!(s.block_order(), &["B2", "B1"]);
        assert_eq!(s.questions("B2"), &["q3"]);
        assert!(s.questions("B1").is_empty());
        assert_eq!(s.block("B1").map(|b| b.order), Some(1));
    }
}
