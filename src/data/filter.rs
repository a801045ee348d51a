use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{Dataset, Passenger, Pclass, Sex};

// ---------------------------------------------------------------------------
// Filter selection: which sexes and classes are currently chosen
// ---------------------------------------------------------------------------

/// The user's current choice in each filter dimension.
///
/// An empty set selects nothing in that dimension; there is no implicit
/// "select all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub sexes: BTreeSet<Sex>,
    pub classes: BTreeSet<Pclass>,
}

/// A text selection that names a value outside the enumerated choices.
#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("invalid gender selection '{0}'")]
    Sex(String),
    #[error("invalid class selection '{0}'")]
    Class(String),
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterSelection {
    /// Every sex and every class selected.
    pub fn all() -> Self {
        Self {
            sexes: Sex::ALL.into_iter().collect(),
            classes: Pclass::ALL.into_iter().collect(),
        }
    }

    /// Nothing selected in either dimension.
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            sexes: BTreeSet::new(),
            classes: BTreeSet::new(),
        }
    }

    /// Convert text selections, as emitted by a multi-select control, into
    /// typed values. Any value outside the enumerated choices is rejected.
    pub fn parse<S, C>(sexes: S, classes: C) -> Result<Self, SelectionError>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let sexes = sexes
            .into_iter()
            .map(|s| {
                let s = s.as_ref();
                s.parse::<Sex>().map_err(|_| SelectionError::Sex(s.to_string()))
            })
            .collect::<Result<_, _>>()?;
        let classes = classes
            .into_iter()
            .map(|c| {
                let c = c.as_ref();
                c.parse::<Pclass>()
                    .map_err(|_| SelectionError::Class(c.to_string()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { sexes, classes })
    }

    pub fn toggle_sex(&mut self, sex: Sex) {
        if !self.sexes.remove(&sex) {
            self.sexes.insert(sex);
        }
    }

    pub fn toggle_class(&mut self, class: Pclass) {
        if !self.classes.remove(&class) {
            self.classes.insert(class);
        }
    }

    pub fn select_all_sexes(&mut self) {
        self.sexes = Sex::ALL.into_iter().collect();
    }

    pub fn select_no_sexes(&mut self) {
        self.sexes.clear();
    }

    pub fn select_all_classes(&mut self) {
        self.classes = Pclass::ALL.into_iter().collect();
    }

    pub fn select_no_classes(&mut self) {
        self.classes.clear();
    }

    /// Whether a passenger passes both dimensions.
    pub fn matches(&self, passenger: &Passenger) -> bool {
        self.sexes.contains(&passenger.sex) && self.classes.contains(&passenger.pclass)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Return indices of passengers that pass the selection, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    if selection.sexes.is_empty() || selection.classes.is_empty() {
        return Vec::new();
    }
    dataset
        .passengers
        .iter()
        .enumerate()
        .filter(|(_, p)| selection.matches(p))
        .map(|(i, _)| i)
        .collect()
}

/// The passengers that pass the selection, in dataset order.
pub fn filtered_view<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Passenger> {
    filtered_indices(dataset, selection)
        .into_iter()
        .map(|i| &dataset.passengers[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{four_passengers, passenger};

    #[test]
    fn full_selection_returns_whole_dataset() {
        let ds = four_passengers();
        let view = filtered_view(&ds, &FilterSelection::all());
        assert_eq!(view.len(), ds.len());
        assert!(view.iter().zip(&ds.passengers).all(|(a, b)| *a == b));
    }

    #[test]
    fn empty_dimension_returns_nothing() {
        let ds = four_passengers();

        let mut no_sex = FilterSelection::all();
        no_sex.select_no_sexes();
        assert!(filtered_view(&ds, &no_sex).is_empty());

        let mut no_class = FilterSelection::all();
        no_class.select_no_classes();
        assert!(filtered_view(&ds, &no_class).is_empty());

        assert!(filtered_view(&ds, &FilterSelection::none()).is_empty());
    }

    #[test]
    fn single_sex_and_class() {
        let ds = four_passengers();
        let selection = FilterSelection::parse(["male"], ["1"]).unwrap();
        let view = filtered_view(&ds, &selection);
        assert_eq!(
            view,
            vec![&passenger(Sex::Male, Pclass::First, true, Some(22.0))]
        );
    }

    #[test]
    fn preserves_dataset_order() {
        let ds = four_passengers();
        let selection = FilterSelection::parse(["female", "male"], ["3", "1"]).unwrap();
        assert_eq!(filtered_indices(&ds, &selection), vec![0, 1, 2, 3]);

        let third = FilterSelection::parse(["male", "female"], ["3"]).unwrap();
        assert_eq!(filtered_indices(&ds, &third), vec![1, 3]);
    }

    #[test]
    fn rejects_unknown_text_values() {
        assert_eq!(
            FilterSelection::parse(["male", "other"], ["1"]),
            Err(SelectionError::Sex("other".to_string()))
        );
        assert_eq!(
            FilterSelection::parse(["male"], ["1", "4"]),
            Err(SelectionError::Class("4".to_string()))
        );
        assert_eq!(
            FilterSelection::parse(["male"], ["x"]),
            Err(SelectionError::Class("x".to_string()))
        );
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut selection = FilterSelection::all();
        selection.toggle_sex(Sex::Female);
        selection.toggle_class(Pclass::Second);
        assert!(!selection.sexes.contains(&Sex::Female));
        assert!(!selection.classes.contains(&Pclass::Second));
        selection.toggle_sex(Sex::Female);
        selection.toggle_class(Pclass::Second);
        assert_eq!(selection, FilterSelection::all());
    }
}
