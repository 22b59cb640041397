// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Bound, sync::Arc};

use crossbeam_skiplist::SkipMap;
use mibkit_type::{Error, Result, RowIndex};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::{
	row::{EnrollmentOwner, Row},
	schema::TableSchema,
};

/// Rows of one conceptual table, ordered by [`RowIndex`].
///
/// Reads go straight to the skip list. Structural changes (insert, reserve,
/// remove) serialize on a short table-wide lock that is never held across
/// transaction phases.
pub struct Table {
	schema: Arc<TableSchema>,
	rows: SkipMap<RowIndex, Arc<Row>>,
	structure: Mutex<()>,
}

impl Table {
	pub fn new(schema: TableSchema) -> Self {
		Self::with_schema(Arc::new(schema))
	}

	pub fn with_schema(schema: Arc<TableSchema>) -> Self {
		Self {
			schema,
			rows: SkipMap::new(),
			structure: Mutex::new(()),
		}
	}

	pub fn schema(&self) -> &Arc<TableSchema> {
		&self.schema
	}

	pub fn name(&self) -> &str {
		self.schema.name()
	}

	pub fn lookup(&self, index: &RowIndex) -> Option<Arc<Row>> {
		self.rows.get(index).map(|entry| entry.value().clone()).filter(|row| row.is_visible())
	}

	/// Looks up a row whether or not it has been published yet.
	pub fn lookup_any(&self, index: &RowIndex) -> Option<Arc<Row>> {
		self.rows.get(index).map(|entry| entry.value().clone())
	}

	/// The visible row with the smallest index strictly greater than `index`,
	/// or `None` at the end of the table.
	pub fn successor(&self, index: &RowIndex) -> Option<Arc<Row>> {
		self.rows
			.range((Bound::Excluded(index.clone()), Bound::Unbounded))
			.map(|entry| entry.value().clone())
			.find(|row| row.is_visible())
	}

	pub fn first(&self) -> Option<Arc<Row>> {
		self.rows.iter().map(|entry| entry.value().clone()).find(|row| row.is_visible())
	}

	/// Visible rows in index order.
	pub fn rows(&self) -> Vec<Arc<Row>> {
		self.rows.iter().map(|entry| entry.value().clone()).filter(|row| row.is_visible()).collect()
	}

	pub fn len(&self) -> usize {
		self.rows.iter().filter(|entry| entry.value().is_visible()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Creates a visible row with default values at `index`.
	pub fn create(&self, index: RowIndex) -> Result<Arc<Row>> {
		self.insert(Row::new(self.schema.clone(), index))
	}

	#[instrument(
		name = "table::insert",
		level = "trace",
		skip(self, row),
		fields(table = %self.name(), index = %row.index())
	)]
	pub fn insert(&self, row: Row) -> Result<Arc<Row>> {
		let _guard = self.structure.lock();
		self.check_capacity(row.index())?;
		let row = Arc::new(row);
		self.rows.insert(row.index().clone(), row.clone());
		Ok(row)
	}

	/// Allocates a hidden row for a creating SET, enrolled by `owner` so no
	/// other batch can touch it before it is published or discarded.
	#[instrument(name = "table::reserve", level = "trace", skip(self), fields(table = %self.name()))]
	pub fn reserve(&self, index: RowIndex, owner: EnrollmentOwner) -> Result<Arc<Row>> {
		let _guard = self.structure.lock();
		self.check_capacity(&index)?;
		let row = Arc::new(Row::reserved(self.schema.clone(), index.clone()));
		row.try_enroll(owner)?;
		self.rows.insert(index, row.clone());
		debug!(table = %self.name(), index = %row.index(), "row reserved");
		Ok(row)
	}

	/// Looks up the row at `index`, published or not, and enrolls it for
	/// `owner`. Runs under the structure lock, so the row cannot be removed
	/// between the lookup and the enrollment.
	pub fn enroll(&self, index: &RowIndex, owner: EnrollmentOwner) -> Result<Option<Arc<Row>>> {
		let _guard = self.structure.lock();
		let Some(row) = self.lookup_any(index) else {
			return Ok(None);
		};
		row.try_enroll(owner)?;
		Ok(Some(row))
	}

	/// Removes a row nobody holds.
	#[instrument(name = "table::remove", level = "trace", skip(self), fields(table = %self.name()))]
	pub fn remove(&self, index: &RowIndex) -> Result<Arc<Row>> {
		let _guard = self.structure.lock();
		let row = self.lookup_any(index).ok_or_else(|| Error::RowNotFound {
			index: index.clone(),
		})?;
		if row.has_pending() || row.is_enrolled() {
			return Err(Error::RowEnrolled {
				index: index.clone(),
			});
		}
		self.rows.remove(index);
		Ok(row)
	}

	/// Removes a row on behalf of the batch enrolling it, once that batch has
	/// settled the row's pending snapshot.
	pub fn remove_owned(&self, index: &RowIndex, owner: EnrollmentOwner) -> Result<Arc<Row>> {
		let _guard = self.structure.lock();
		let row = self.lookup_any(index).ok_or_else(|| Error::RowNotFound {
			index: index.clone(),
		})?;
		if row.has_pending() || (row.is_enrolled() && !row.is_enrolled_by(owner)) {
			return Err(Error::RowEnrolled {
				index: index.clone(),
			});
		}
		self.rows.remove(index);
		debug!(table = %self.name(), index = %index, "row removed");
		Ok(row)
	}

	fn check_capacity(&self, index: &RowIndex) -> Result<()> {
		if self.rows.contains_key(index) {
			return Err(Error::IndexExists {
				index: index.clone(),
			});
		}
		if let Some(max) = self.schema.max_rows() {
			if self.rows.len() >= max {
				return Err(Error::ResourceUnavailable {
					reason: format!("{} is full ({max} rows)", self.name()),
				});
			}
		}
		Ok(())
	}
}

impl std::fmt::Debug for Table {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Table").field("name", &self.name()).field("rows", &self.rows.len()).finish()
	}
}
