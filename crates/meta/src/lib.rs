//! Reflected metadata: namespaces, classes, enumerations, callables and the
//! values passed through them.
//!
//! A [`MetaGraph`] is populated once through [`MetaGraphBuilder`] and then
//! read through borrowed [`MetaRef`] handles. Handles are classified by
//! [`Category`] and viewed through typed [`Interface`]s:
//!
//! ```
//! use specula_meta::{Builtin, ClassMeta, MetaGraphBuilder, Value};
//! use specula_range::RangeExt;
//!
//! let mut b = MetaGraphBuilder::new();
//! let shop = b.namespace(b.global(), "shop").unwrap();
//! let item = b.class(shop, "Item").unwrap();
//! let int = b.builtin(Builtin::I64);
//! b.constructor(item).param("qty", int).finish(|args| Ok(Value::I64(args.take()?))).unwrap();
//! let graph = b.build();
//!
//! let class = graph.find("shop::Item").unwrap().try_as::<ClassMeta>().unwrap();
//! let ctor = class.constructors().collect_vec()[0];
//! assert_eq!(ctor.parameters().collect_vec()[0].base_name(), "qty");
//! ```

mod builder;
mod category;
mod error;
mod flatten;
mod graph;
pub mod registry;
mod value;
mod views;

pub use builder::{CallableBuilder, ConstructorBuilder, MetaGraphBuilder};
pub use category::{Category, CategorySet, Interface};
pub use error::MetaError;
pub use flatten::{ExtractAs, Flatten, FlattenInOrder, MetaRangeExt, extract_as, flatten, flatten_in_order};
pub use graph::{EnumValue, MetaGraph, MetaId, MetaRange, MetaRef, ParamRange};
pub use value::{Arguments, Builtin, FromValue, InvokeError, Invoker, Literal, Value, ValueError};
pub use views::{CallableMeta, ClassMeta, EnumMeta, NamespaceMeta, ParameterMeta, ScopeMeta, TypeKind, TypeMeta, VariableMeta};

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod tests;
