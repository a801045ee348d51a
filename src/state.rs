use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::aggregate::{
    age_distribution, age_histogram, counts, survival_by_gender, Counts, HistogramBin,
    SurvivalCounts,
};
use crate::data::filter::{filtered_indices, filtered_view, FilterSelection};
use crate::data::model::{Dataset, Pclass, Sex};

// ---------------------------------------------------------------------------
// Snapshot: everything the displays need after one recompute
// ---------------------------------------------------------------------------

/// Derived values for the current selection. Rebuilt wholesale on every
/// recompute; never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Indices into the dataset of passengers passing the filters.
    pub visible_indices: Vec<usize>,
    pub counts: Counts,
    pub survival_by_gender: BTreeMap<Sex, SurvivalCounts>,
    pub ages: Vec<f64>,
    pub age_histogram: Vec<HistogramBin>,
}

impl Snapshot {
    pub fn compute(dataset: &Dataset, selection: &FilterSelection, bins: usize) -> Self {
        let view = filtered_view(dataset, selection);
        let ages = age_distribution(&view);
        Snapshot {
            counts: counts(&view),
            survival_by_gender: survival_by_gender(&view),
            age_histogram: age_histogram(&ages, bins),
            ages,
            visible_indices: filtered_indices(dataset, selection),
        }
    }
}

/// Callback invoked after every recompute.
pub type Subscriber = Box<dyn FnMut(&Snapshot)>;

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The UI state, independent of rendering.
///
/// Every mutation of the selection goes through a method that ends in
/// [`Dashboard::recompute`], which in turn notifies subscribers.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    selection: FilterSelection,
    histogram_bins: usize,
    snapshot: Snapshot,
    subscribers: Vec<Subscriber>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, selection: FilterSelection, histogram_bins: usize) -> Self {
        let snapshot = Snapshot::compute(&dataset, &selection, histogram_bins);
        Self {
            dataset,
            selection,
            histogram_bins,
            snapshot,
            subscribers: Vec::new(),
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Register a callback run after each recompute, in registration order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Snapshot) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Rebuild the snapshot from the current dataset and selection, then
    /// notify subscribers.
    pub fn recompute(&mut self) {
        self.snapshot = Snapshot::compute(&self.dataset, &self.selection, self.histogram_bins);
        log::debug!(
            "recomputed: {} of {} passengers visible",
            self.snapshot.counts.total,
            self.dataset.len()
        );
        for subscriber in &mut self.subscribers {
            subscriber(&self.snapshot);
        }
    }

    /// Swap in a freshly loaded dataset and reset the filters.
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) {
        self.dataset = dataset;
        self.selection = FilterSelection::all();
        self.status_message = None;
        self.recompute();
    }

    #[cfg(test)]
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.recompute();
    }

    pub fn toggle_sex(&mut self, sex: Sex) {
        self.selection.toggle_sex(sex);
        self.recompute();
    }

    pub fn toggle_class(&mut self, class: Pclass) {
        self.selection.toggle_class(class);
        self.recompute();
    }

    pub fn select_all_sexes(&mut self) {
        self.selection.select_all_sexes();
        self.recompute();
    }

    pub fn select_no_sexes(&mut self) {
        self.selection.select_no_sexes();
        self.recompute();
    }

    pub fn select_all_classes(&mut self) {
        self.selection.select_all_classes();
        self.recompute();
    }

    pub fn select_no_classes(&mut self) {
        self.selection.select_no_classes();
        self.recompute();
    }
}
