use std::sync::Arc;

use tracing::trace;

use super::entities::{StoredRecord, DEFAULT_CATEGORIES, DEFAULT_CATEGORY};

/// Whether records are grouped by category at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLayout {
    /// Everything lands in a single implicit group.
    Flat,
    /// Known labels in display order. Groups for these exist even while empty.
    Categorized(Vec<Arc<str>>),
}

impl CategoryLayout {
    pub fn categorized<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Self {
        let labels = labels
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Arc::from)
            .collect::<Vec<_>>();
        if labels.is_empty() {
            Self::Flat
        } else {
            Self::Categorized(labels)
        }
    }

    fn initial_labels(&self) -> Vec<Arc<str>> {
        match self {
            CategoryLayout::Flat => vec![DEFAULT_CATEGORY.into()],
            CategoryLayout::Categorized(labels) => labels.clone(),
        }
    }
}

impl Default for CategoryLayout {
    fn default() -> Self {
        Self::categorized(DEFAULT_CATEGORIES)
    }
}

/// Records of one category, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<R> {
    pub category: Arc<str>,
    pub records: Vec<R>,
}

/// In-memory, append-only collection of records. Nothing is ever removed or rewritten; the store
/// lives exactly as long as its owner.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    layout: CategoryLayout,
    groups: Vec<CategoryGroup<R>>,
    /// (group, position in group) of every record, oldest first.
    insertion_order: Vec<(usize, usize)>,
}

impl<R: StoredRecord> RecordStore<R> {
    pub fn new(layout: CategoryLayout) -> Self {
        let groups = layout
            .initial_labels()
            .into_iter()
            .map(|category| CategoryGroup {
                category,
                records: vec![],
            })
            .collect();
        Self {
            layout,
            groups,
            insertion_order: vec![],
        }
    }

    pub fn layout(&self) -> &CategoryLayout {
        &self.layout
    }

    /// Adds a record at the end of its category. Labels unknown to the layout get a group of their
    /// own after every configured one.
    pub fn append(&mut self, record: R) {
        let label: Arc<str> = match self.layout {
            CategoryLayout::Flat => DEFAULT_CATEGORY,
            CategoryLayout::Categorized(_) => record
                .category()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_CATEGORY),
        }
        .into();

        let group_index = match self.groups.iter().position(|v| v.category == label) {
            Some(index) => index,
            None => {
                trace!("Opening new category group {label}");
                self.groups.push(CategoryGroup {
                    category: label,
                    records: vec![],
                });
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[group_index];
        self.insertion_order.push((group_index, group.records.len()));
        group.records.push(record);
    }

    /// All groups in display order.
    pub fn list_all(&self) -> &[CategoryGroup<R>] {
        &self.groups
    }

    /// Every record in the order it was appended, whatever its category.
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.insertion_order
            .iter()
            .map(|&(group, index)| &self.groups[group].records[index])
    }

    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }
}

impl<R: StoredRecord> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new(CategoryLayout::default())
    }
}
