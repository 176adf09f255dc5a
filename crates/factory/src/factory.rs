use specula_meta::{ClassMeta, MetaGraph, Value};

use crate::build::TreeBuilder;
use crate::enums::EnumMatcher;
use crate::node::{Cx, FactoryNode, Role};
use crate::{ContextPath, DataSource, FactoryConfig, Fit, Result};

/// Builds instances of one product class from data sources.
///
/// The build tree is derived from the class metadata once and reused for
/// every unit; it is reset before each unit so nothing learned from one unit
/// leaks into the next.
pub struct Factory<'g> {
	class: ClassMeta<'g>,
	root: FactoryNode<'g>,
	config: FactoryConfig,
	matcher: Box<dyn EnumMatcher>,
}

impl<'g> Factory<'g> {
	/// Factory for `class` with the default configuration.
	pub fn new(class: ClassMeta<'g>) -> Result<Self> {
		Self::with_config(class, FactoryConfig::default())
	}

	pub fn with_config(class: ClassMeta<'g>, config: FactoryConfig) -> Result<Self> {
		let root = TreeBuilder::root(class)?;
		let matcher = config.matcher();
		tracing::debug!(domain = "factory", class = %class.full_name(), "build tree ready");
		Ok(Self {
			class,
			root,
			config,
			matcher,
		})
	}

	/// Factory for the class declared as `full_name` in `graph`.
	pub fn for_name(graph: &'g MetaGraph, full_name: &str, config: FactoryConfig) -> Result<Self> {
		let class = graph.require(full_name)?.expect_as::<ClassMeta>()?;
		Self::with_config(class, config)
	}

	pub fn class(&self) -> ClassMeta<'g> {
		self.class
	}

	pub fn config(&self) -> &FactoryConfig {
		&self.config
	}

	/// Root of the build tree.
	pub fn root(&self) -> &FactoryNode<'g> {
		&self.root
	}

	/// Role and path of every slot of the build tree, in pre-order.
	pub fn slots(&self) -> Vec<(Role, ContextPath)> {
		let mut slots = Vec::new();
		self.root.walk(&mut |role, path| slots.push((role, path.clone())));
		slots
	}

	/// How well the source's current unit fits the product class.
	pub fn score(&mut self, src: &mut dyn DataSource) -> Fit {
		self.root.reset();
		let mut cx = Cx {
			src,
			config: &self.config,
			matcher: &*self.matcher,
		};
		self.root.score(&mut cx, 0)
	}

	/// Builds the product from the source's current unit.
	pub fn create(&mut self, src: &mut dyn DataSource) -> Result<Value> {
		self.root.reset();
		let mut cx = Cx {
			src,
			config: &self.config,
			matcher: &*self.matcher,
		};
		self.root.create(&mut cx, 0)
	}

	/// Advances the source and builds the product from the new unit.
	///
	/// Returns `Ok(None)` once the source is exhausted.
	pub fn next(&mut self, src: &mut dyn DataSource) -> Result<Option<Value>> {
		if !src.advance() {
			return Ok(None);
		}
		self.create(src).map(Some)
	}

	/// Builds a product from every remaining unit, stopping at the first failure.
	pub fn create_all(&mut self, src: &mut dyn DataSource) -> Result<Vec<Value>> {
		let mut values = Vec::new();
		while let Some(value) = self.next(src)? {
			values.push(value);
		}
		Ok(values)
	}
}
