//! Question configuration list
//!
//! Ordered collection of `(type, quantity, difficulty)` entries. The list is
//! never empty: it starts with one default entry and refuses to remove the
//! last one.

use crate::quiz::{ConfigId, Difficulty, QuestionConfig, QuestionType};

/// Quantities offered by the interactive picker
pub const QUANTITY_CHOICES: [u32; 7] = [1, 2, 3, 5, 10, 15, 20];

/// A single-field change to a configuration entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigUpdate {
    Type(QuestionType),
    Quantity(u32),
    Difficulty(Difficulty),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionConfigList {
    entries: Vec<QuestionConfig>,
    next_id: u32,
}

impl Default for QuestionConfigList {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionConfigList {
    /// List holding one default entry
    pub fn new() -> Self {
        let mut list = Self {
            entries: Vec::new(),
            next_id: 1,
        };
        list.add();
        list
    }

    /// Build from explicit entries; ids are reassigned. Falls back to the
    /// default list when `items` is empty.
    pub fn from_entries<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (QuestionType, u32, Difficulty)>,
    {
        let mut list = Self {
            entries: Vec::new(),
            next_id: 1,
        };
        for (question_type, quantity, difficulty) in items {
            let id = list.add();
            list.update(id, ConfigUpdate::Type(question_type));
            list.update(id, ConfigUpdate::Quantity(quantity));
            list.update(id, ConfigUpdate::Difficulty(difficulty));
        }
        if list.entries.is_empty() {
            list.add();
        }
        list
    }

    /// Append a default entry and return its id
    pub fn add(&mut self) -> ConfigId {
        let id = ConfigId(self.next_id);
        self.next_id += 1;
        self.entries.push(QuestionConfig::with_id(id));
        id
    }

    /// Remove an entry. Rejected when it is the last one or the id is unknown.
    pub fn remove(&mut self, id: ConfigId) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        let before = self.entries.len();
        self.entries.retain(|c| c.id != id);
        self.entries.len() != before
    }

    /// Replace one field of an entry. Unknown ids and quantities outside
    /// `1..=MAX_QUANTITY` are ignored.
    pub fn update(&mut self, id: ConfigId, update: ConfigUpdate) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        match update {
            ConfigUpdate::Type(question_type) => entry.question_type = question_type,
            ConfigUpdate::Quantity(quantity)
                if quantity == 0 || quantity > QuestionConfig::MAX_QUANTITY =>
            {
                return false;
            }
            ConfigUpdate::Quantity(quantity) => entry.quantity = quantity,
            ConfigUpdate::Difficulty(difficulty) => entry.difficulty = difficulty,
        }
        true
    }

    /// Whether another entry can be removed
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    /// Sum of requested quantities, saturating at `u32::MAX`
    pub fn total_questions(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.quantity))
    }

    pub fn get(&self, id: ConfigId) -> Option<&QuestionConfig> {
        self.entries.iter().find(|c| c.id == id)
    }

    pub fn entries(&self) -> &[QuestionConfig] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Next quantity in [`QUANTITY_CHOICES`] after `current`, wrapping around
pub fn next_quantity(current: u32) -> u32 {
    QUANTITY_CHOICES
        .iter()
        .copied()
        .find(|q| *q > current)
        .unwrap_or(QUANTITY_CHOICES[0])
}

/// Previous quantity in [`QUANTITY_CHOICES`] before `current`, wrapping around
pub fn prev_quantity(current: u32) -> u32 {
    QUANTITY_CHOICES
        .iter()
        .rev()
        .copied()
        .find(|q| *q < current)
        .unwrap_or(QUANTITY_CHOICES[QUANTITY_CHOICES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_one_default_entry() {
        let list = QuestionConfigList::new();
        assert_eq!(list.len(), 1);
        let entry = list.entries()[0];
        assert_eq!(entry.question_type, QuestionType::MultipleChoice);
        assert_eq!(entry.quantity, 5);
        assert_eq!(entry.difficulty, Difficulty::Medium);
        assert_eq!(list.total_questions(), 5);
    }

    #[test]
    fn test_ids_stay_unique_after_removal() {
        let mut list = QuestionConfigList::new();
        let second = list.add();
        let third = list.add();
        assert!(list.remove(second));
        let fourth = list.add();

        let ids: Vec<_> = list.entries().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&third));
        assert!(ids.contains(&fourth));
        assert_ne!(second, fourth);
    }

    #[test]
    fn test_last_entry_cannot_be_removed() {
        let mut list = QuestionConfigList::new();
        let only = list.entries()[0].id;
        assert!(!list.can_remove());
        assert!(!list.remove(only));
        assert_eq!(list.len(), 1);

        let extra = list.add();
        assert!(list.remove(only));
        assert!(!list.remove(extra));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_update_touches_one_field() {
        let mut list = QuestionConfigList::new();
        let id = list.entries()[0].id;

        assert!(list.update(id, ConfigUpdate::Difficulty(Difficulty::Hard)));
        let entry = list.get(id).unwrap();
        assert_eq!(entry.difficulty, Difficulty::Hard);
        assert_eq!(entry.quantity, 5);
        assert_eq!(entry.question_type, QuestionType::MultipleChoice);

        assert!(!list.update(ConfigId(99), ConfigUpdate::Quantity(3)));
        assert!(!list.update(id, ConfigUpdate::Quantity(0)));
        assert_eq!(list.get(id).unwrap().quantity, 5);
    }

    #[test]
    fn test_quantity_is_bounded() {
        let mut list = QuestionConfigList::new();
        let id = list.entries()[0].id;

        assert!(list.update(id, ConfigUpdate::Quantity(QuestionConfig::MAX_QUANTITY)));
        assert!(!list.update(id, ConfigUpdate::Quantity(QuestionConfig::MAX_QUANTITY + 1)));
        assert!(!list.update(id, ConfigUpdate::Quantity(u32::MAX)));
        assert_eq!(list.get(id).unwrap().quantity, QuestionConfig::MAX_QUANTITY);

        // oversized entries keep the default quantity, so the sum cannot overflow
        let list = QuestionConfigList::from_entries([
            (QuestionType::MultipleChoice, u32::MAX, Difficulty::Easy),
            (QuestionType::Essay, 1, Difficulty::Hard),
        ]);
        assert_eq!(list.total_questions(), QuestionConfig::DEFAULT_QUANTITY + 1);
    }

    #[test]
    fn test_total_follows_every_mutation() {
        let mut list = QuestionConfigList::from_entries([
            (QuestionType::MultipleChoice, 3, Difficulty::Easy),
            (QuestionType::Essay, 2, Difficulty::Hard),
        ]);
        assert_eq!(list.total_questions(), 5);

        let added = list.add();
        assert_eq!(list.total_questions(), 10);

        list.update(added, ConfigUpdate::Quantity(20));
        assert_eq!(list.total_questions(), 25);

        let first = list.entries()[0].id;
        list.remove(first);
        assert_eq!(list.total_questions(), 22);

        let expected: u32 = list.entries().iter().map(|c| c.quantity).sum();
        assert_eq!(list.total_questions(), expected);
    }

    #[test]
    fn test_from_empty_entries_falls_back_to_default() {
        let list = QuestionConfigList::from_entries(Vec::new());
        assert_eq!(list.len(), 1);
        assert_eq!(list.total_questions(), 5);
    }

    #[test]
    fn test_quantity_picker_wraps() {
        assert_eq!(next_quantity(5), 10);
        assert_eq!(next_quantity(20), 1);
        assert_eq!(prev_quantity(1), 20);
        assert_eq!(prev_quantity(5), 3);
        // values outside the choice list snap to the neighbouring choice
        assert_eq!(next_quantity(4), 5);
        assert_eq!(prev_quantity(7), 5);
    }
}
