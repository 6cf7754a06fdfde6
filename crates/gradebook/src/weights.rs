//! Work-type weighting coefficients.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{GradebookError, Result};

/// Coefficients used by school e-journals for each kind of assessed work.
const STANDARD_WEIGHTS: &[(&str, f64)] = &[
    ("Ответ на уроке", 1.0),
    ("Работа на уроке", 1.0),
    ("Домашняя работа", 1.0),
    ("Тест", 1.0),
    ("Творческая работа", 1.0),
    ("Чтение наизусть", 1.0),
    ("Самостоятельная работа", 1.2),
    ("Проверочная работа", 1.2),
    ("Практическая работа", 1.2),
    ("Лабораторная работа", 1.2),
    ("Проект", 1.2),
    ("Контрольная работа", 1.5),
    ("Диктант", 1.5),
    ("Изложение", 1.5),
    ("Сочинение", 1.5),
    ("Зачёт", 1.5),
    ("Диагностическая работа", 1.5),
    ("Итоговая контрольная работа", 2.0),
];

static STANDARD: Lazy<WorkTypeWeights> = Lazy::new(|| {
    let mut weights = WorkTypeWeights::default();
    for (label, weight) in STANDARD_WEIGHTS {
        debug_assert!(*weight > 0.0);
        weights.insert_first_wins(label, *weight);
    }
    weights
});

/// Immutable lookup from work-type label to weighting coefficient
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkTypeWeights {
    weights: HashMap<String, f64>,
}

impl WorkTypeWeights {
    /// The process-wide table used for real reports
    pub fn standard() -> &'static WorkTypeWeights {
        &STANDARD
    }

    /// Build a table from `(label, coefficient)` pairs.
    ///
    /// When a label repeats, the first coefficient is kept. Every
    /// coefficient must be positive and finite.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut weights = Self::default();
        for (label, weight) in entries {
            let label = label.into();
            if !(weight.is_finite() && weight > 0.0) {
                return Err(GradebookError::InvalidWeight { label, weight });
            }
            weights.insert_first_wins(&label, weight);
        }
        Ok(weights)
    }

    fn insert_first_wins(&mut self, label: &str, weight: f64) {
        if self.weights.contains_key(label) {
            log::debug!("duplicate work type {:?} ignored", label);
            return;
        }
        self.weights.insert(label.to_string(), weight);
    }

    /// Coefficient for a work type, `None` if the label is unknown
    pub fn weight(&self, label: &str) -> Option<f64> {
        self.weights.get(label).copied()
    }

    /// Number of known work types
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate over `(label, coefficient)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let weights = WorkTypeWeights::standard();
        assert_eq!(weights.weight("Контрольная работа"), Some(1.5));
        assert_eq!(weights.weight("Тест"), Some(1.0));
        assert_eq!(weights.weight("Гадание на кофейной гуще"), None);
        assert_eq!(weights.len(), STANDARD_WEIGHTS.len());
        assert!(weights.iter().all(|(_, w)| w > 0.0));
    }

    #[test]
    fn test_standard_is_shared() {
        assert!(std::ptr::eq(
            WorkTypeWeights::standard(),
            WorkTypeWeights::standard()
        ));
    }

    #[test]
    fn test_duplicate_label_first_wins() {
        let weights =
            WorkTypeWeights::from_entries([("Тест", 1.0), ("Диктант", 1.5), ("Тест", 3.0)])
                .unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.weight("Тест"), Some(1.0));
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let err = WorkTypeWeights::from_entries([("Тест", 0.0)]).unwrap_err();
        assert!(matches!(err, GradebookError::InvalidWeight { .. }));

        let err = WorkTypeWeights::from_entries([("Тест", f64::NAN)]).unwrap_err();
        assert!(matches!(err, GradebookError::InvalidWeight { .. }));
    }
}
