//! Flat tables such as database result sets.

use specula_factory::{ConstructorSelector, ContextPath, DataSource, FactoryConfig, Field, FieldCoverageSelector};

/// Separator joining parameter names into column names, so the street of
/// an `addr` parameter lives in column `addr__street`.
pub const COLUMN_SEPARATOR: &str = "__";

/// A table of named columns; each row is one unit.
///
/// Nested parameters are addressed by flattened column names (see
/// [`COLUMN_SEPARATOR`]), matched case-insensitively. Rows have no notion of
/// repeated values, so sequence parameters cannot be built from them.
/// Polymorphic classes pick the constructor binding the most non-null
/// columns.
#[derive(Debug, Clone, Default)]
pub struct RowSource {
	columns: Vec<String>,
	rows: Vec<Vec<Field>>,
	cursor: Option<usize>,
}

impl RowSource {
	pub fn new<I, S>(columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			columns: columns.into_iter().map(Into::into).collect(),
			rows: Vec::new(),
			cursor: None,
		}
	}

	/// Appends a row. Missing trailing cells read as null, surplus cells are dropped.
	pub fn push_row<I, F>(&mut self, cells: I) -> &mut Self
	where
		I: IntoIterator<Item = F>,
		F: Into<Field>,
	{
		let mut row: Vec<Field> = cells.into_iter().map(Into::into).take(self.columns.len()).collect();
		row.resize(self.columns.len(), Field::Null);
		self.rows.push(row);
		self
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Index of the current row, `None` before the first `advance`.
	pub fn position(&self) -> Option<usize> {
		self.cursor
	}

	fn row(&self) -> Option<&[Field]> {
		self.cursor.and_then(|cursor| self.rows.get(cursor)).map(Vec::as_slice)
	}
}

impl DataSource for RowSource {
	fn field_count(&self) -> usize {
		self.row().map_or(0, <[Field]>::len)
	}

	fn field(&self, index: usize) -> Option<Field> {
		self.row()?.get(index).cloned()
	}

	fn find_field(&self, path: &ContextPath, _position_hint: usize) -> Option<usize> {
		let key = path.field_key(COLUMN_SEPARATOR);
		self.columns.iter().position(|column| column.eq_ignore_ascii_case(&key))
	}

	fn advance(&mut self) -> bool {
		let next = self.cursor.map_or(0, |cursor| cursor + 1);
		self.cursor = Some(next.min(self.rows.len()));
		next < self.rows.len()
	}

	fn selector(&self, _config: &FactoryConfig) -> Box<dyn ConstructorSelector> {
		Box::new(FieldCoverageSelector::new())
	}
}
