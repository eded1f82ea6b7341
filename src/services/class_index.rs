//! Case-insensitive index of every class that can serve as a base class.
//!
//! The index is built fresh for each operation from one or more source roots and
//! is never modified afterwards.
//!
//! # Precedence
//!
//! Roots are merged in the order given and the first record for a name wins.
//! Callers pass the engine tree first, so a project header that re-declares an
//! engine class name never replaces the engine's record, and the `#include`
//! emitted for that base keeps pointing at the engine header.

use crate::error::{ClassGenError, Result};
use crate::models::class_record::fold_key;
use crate::models::ClassRecord;
use crate::parser::SourceScanner;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Mapping from class name (case-insensitive) to its record.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    records: HashMap<String, ClassRecord>,
}

impl ClassIndex {
    /// Scans `roots` one after the other and merges the results.
    ///
    /// A root that does not exist is skipped with a warning; a project without a
    /// `Source` folder yet still gets the engine classes.
    ///
    /// # Errors
    ///
    /// Propagates [`ClassGenError::SourceTreeUnreadable`] and
    /// [`ClassGenError::Cancelled`] from the scanner.
    pub fn build(scanner: &SourceScanner, roots: &[PathBuf]) -> Result<Self> {
        let mut index = Self::default();

        for root in roots {
            if !root.exists() {
                warn!("Source root {} does not exist, skipping", root.display());
                continue;
            }

            let records = scanner.scan(root)?;
            let added = index.merge(records);
            info!("Indexed {} classes from {}", added, root.display());
        }

        Ok(index)
    }

    /// Same result as [`ClassIndex::build`], scanning each root on its own thread.
    ///
    /// Partial results are merged in root order once all scans finish, so
    /// precedence does not depend on which thread completes first.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing root in root order.
    pub fn build_parallel(scanner: &SourceScanner, roots: &[PathBuf]) -> Result<Self> {
        let partials: Vec<Option<Result<Vec<ClassRecord>>>> = std::thread::scope(|scope| {
            let handles: Vec<_> = roots
                .iter()
                .map(|root| {
                    if root.exists() {
                        Some(scope.spawn(move || scanner.scan(root)))
                    } else {
                        warn!("Source root {} does not exist, skipping", root.display());
                        None
                    }
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.map(|h| match h.join() {
                        Ok(result) => result,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                })
                .collect()
        });

        let mut index = Self::default();
        for (root, partial) in roots.iter().zip(partials) {
            if let Some(records) = partial {
                let added = index.merge(records?);
                info!("Indexed {} classes from {}", added, root.display());
            }
        }

        Ok(index)
    }

    /// Builds an index from already-scanned records, first record per name winning.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ClassRecord>,
    {
        let mut index = Self::default();
        index.merge(records);
        index
    }

    /// Inserts records that are not yet present; returns how many were added.
    fn merge<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ClassRecord>,
    {
        let mut added = 0;
        for record in records {
            if let std::collections::hash_map::Entry::Vacant(slot) = self.records.entry(record.key())
            {
                slot.insert(record);
                added += 1;
            }
        }
        added
    }

    /// Looks up a class by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ClassGenError::UnknownBaseClass`] if the name was never indexed.
    pub fn lookup(&self, name: &str) -> Result<&ClassRecord> {
        self.records
            .get(&fold_key(name.trim()))
            .ok_or_else(|| ClassGenError::UnknownBaseClass(name.trim().to_string()))
    }

    /// Number of indexed classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All class names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .records
            .values()
            .map(|record| record.class_name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Class names containing `filter` (ignoring case), sorted.
    ///
    /// An empty filter returns every name.
    #[must_use]
    pub fn filter(&self, filter: &str) -> Vec<&str> {
        self.matching(filter)
            .into_iter()
            .map(|record| record.class_name.as_str())
            .collect()
    }

    /// Records whose class name contains `filter` (ignoring case), sorted by name.
    #[must_use]
    pub fn matching(&self, filter: &str) -> Vec<&ClassRecord> {
        let needle = fold_key(filter.trim());
        let mut records: Vec<&ClassRecord> = self
            .records
            .iter()
            .filter(|(key, _)| key.contains(&needle))
            .map(|(_, record)| record)
            .collect();
        records.sort_unstable_by(|a, b| a.class_name.cmp(&b.class_name));
        records
    }
}
