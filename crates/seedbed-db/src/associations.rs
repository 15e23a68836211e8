//! Relationship descriptors.
//!
//! - [`ForeignKey`] names the column of a child model that points at a parent.
//! - [`Pivot`] is implemented by the "through" model of a many-to-many relation.

use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

use crate::model::{Model, PrimaryKey};
use crate::record::{Record, RecordId};

/// Foreign key column on `C` referencing the primary key of `P`.
///
/// # Examples
///
/// ```
/// use seedbed_db::{ForeignKey, Model, RecordId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Author { id: Option<i64> }
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Post { id: Option<i64>, author_id: Option<i64> }
///
/// impl Model for Author {
///     type PrimaryKey = i64;
///     fn table_name() -> &'static str { "authors" }
///     fn primary_key(&self) -> Option<&i64> { self.id.as_ref() }
///     fn set_primary_key(&mut self, value: i64) { self.id = Some(value); }
/// }
/// impl Model for Post {
///     type PrimaryKey = i64;
///     fn table_name() -> &'static str { "posts" }
///     fn primary_key(&self) -> Option<&i64> { self.id.as_ref() }
///     fn set_primary_key(&mut self, value: i64) { self.id = Some(value); }
/// }
///
/// let fk: ForeignKey<Post, Author> = ForeignKey::new("author_id");
/// let mut post = serde_json::json!({"id": 1, "author_id": null});
/// let post = post.as_object_mut().unwrap();
/// fk.assign(post, &RecordId::Int(4));
/// assert_eq!(fk.read(post), Some(RecordId::Int(4)));
/// ```
pub struct ForeignKey<C, P> {
	field_name: &'static str,
	_models: PhantomData<fn() -> (C, P)>,
}

impl<C: Model, P: Model> ForeignKey<C, P> {
	/// Creates a foreign key stored in `field_name` on the child table.
	pub fn new(field_name: &'static str) -> Self {
		Self {
			field_name,
			_models: PhantomData,
		}
	}

	/// Column name on the child table.
	pub fn field_name(&self) -> &'static str {
		self.field_name
	}

	/// Points the child record at `parent`.
	pub fn assign(&self, child: &mut Record, parent: &RecordId) {
		child.insert(self.field_name.to_string(), parent.to_value());
	}

	/// Clears the reference.
	pub fn clear(&self, child: &mut Record) {
		child.insert(self.field_name.to_string(), Value::Null);
	}

	/// Reads the referenced parent key from a child record.
	pub fn read(&self, child: &Record) -> Option<RecordId> {
		child
			.get(self.field_name)
			.and_then(|value| RecordId::for_table(&P::table(), value))
	}

	/// Reads the referenced parent key as the parent's typed key.
	pub fn read_typed(&self, child: &Record) -> Option<P::PrimaryKey> {
		self.read(child)
			.and_then(|id| <P::PrimaryKey as PrimaryKey>::from_record_id(&id))
	}
}

impl<C, P> Clone for ForeignKey<C, P> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<C, P> Copy for ForeignKey<C, P> {}

impl<C, P> fmt::Debug for ForeignKey<C, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ForeignKey")
			.field("field_name", &self.field_name)
			.finish()
	}
}

/// Through model of a many-to-many relation between `Left` and `Right`.
///
/// Attaching two rows means inserting one pivot row built by [`Pivot::link`].
pub trait Pivot: Model {
	/// One side of the relation.
	type Left: Model;
	/// The other side of the relation.
	type Right: Model;

	/// Column holding the left row's key.
	fn left_key() -> &'static str;

	/// Column holding the right row's key.
	fn right_key() -> &'static str;

	/// Builds an unsaved pivot row joining `left` and `right`.
	fn link(
		left: &<Self::Left as Model>::PrimaryKey,
		right: &<Self::Right as Model>::PrimaryKey,
	) -> Self;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde::{Deserialize, Serialize};
	use serde_json::json;

	#[derive(Debug, Clone, Serialize, Deserialize)]
	struct Team {
		id: Option<i64>,
	}

	impl Model for Team {
		type PrimaryKey = i64;

		fn table_name() -> &'static str {
			"teams"
		}

		fn primary_key(&self) -> Option<&i64> {
			self.id.as_ref()
		}

		fn set_primary_key(&mut self, value: i64) {
			self.id = Some(value);
		}
	}

	#[derive(Debug, Clone, Serialize, Deserialize)]
	struct Player {
		id: Option<i64>,
		team_id: Option<i64>,
	}

	impl Model for Player {
		type PrimaryKey = i64;

		fn table_name() -> &'static str {
			"players"
		}

		fn primary_key(&self) -> Option<&i64> {
			self.id.as_ref()
		}

		fn set_primary_key(&mut self, value: i64) {
			self.id = Some(value);
		}
	}

	#[rstest]
	fn test_assign_and_clear() {
		let fk: ForeignKey<Player, Team> = ForeignKey::new("team_id");
		let mut player = json!({"id": 1}).as_object().cloned().unwrap();

		fk.assign(&mut player, &RecordId::Int(3));
		assert_eq!(fk.read_typed(&player), Some(3));

		fk.clear(&mut player);
		assert_eq!(fk.read(&player), None);
		assert_eq!(player["team_id"], Value::Null);
	}

	#[rstest]
	fn test_field_name() {
		let fk: ForeignKey<Player, Team> = ForeignKey::new("team_id");
		let copy = fk;
		assert_eq!(copy.field_name(), "team_id");
		assert_eq!(format!("{:?}", fk), r#"ForeignKey { field_name: "team_id" }"#);
	}
}
