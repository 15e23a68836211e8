//! Relationship attachment between persisted rows.
//!
//! Every function here processes rows one at a time and returns once all rows
//! are processed. Rows are sampled from what is already persisted; the only
//! exception is [`attach_random_children`], which can create fresh children
//! through a factory when the child table is empty.

use seedbed_db::{
	Database, DatabaseError, DatabaseExt, Filter, ForeignKey, Model, Pivot, PrimaryKey, Query,
	Record, RecordId, encode_model,
};
use serde::{Deserialize, Serialize};

use crate::error::SeedingResult;
use crate::factory::ModelFactory;
use crate::schema::Seedable;

/// Which side of a many-to-many relation drives sibling attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SiblingSeedDirection {
	/// Iterate left rows and link each to sampled right rows.
	#[default]
	LeftToRight,
	/// Iterate right rows and link each to sampled left rows.
	RightToLeft,
}

/// Outcome of one attachment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachReport {
	/// Rows iterated on the driving side.
	pub visited: usize,
	/// Links written (foreign keys set or pivot rows created).
	pub linked: usize,
	/// Rows created because the sampled side was empty.
	pub created: usize,
}

fn row_key(record: &Record, table: &seedbed_db::TableRef) -> SeedingResult<RecordId> {
	RecordId::key_of(record, table)
		.ok_or_else(|| DatabaseError::MissingPrimaryKey(table.name.to_string()).into())
}

fn typed_key<M: Model>(record: &Record) -> SeedingResult<M::PrimaryKey> {
	let table = M::table();
	let key = row_key(record, &table)?;
	<M::PrimaryKey as PrimaryKey>::from_record_id(&key).ok_or_else(|| {
		DatabaseError::InvalidRecord {
			table: table.name.to_string(),
			message: format!("primary key `{}` has the wrong type", key),
		}
		.into()
	})
}

fn warn_short(relation: &str, wanted: usize, available: usize) {
	if available < wanted {
		tracing::warn!(
			relation,
			wanted,
			available,
			"fewer candidate rows than requested; attaching all available"
		);
	}
}

/// Points every child row at one randomly chosen parent row.
///
/// Fails with an ordering violation when a child is found but no parent
/// matches `parent_query`.
pub async fn attach_random_parent<P: Model, C: Model>(
	fk: &ForeignKey<C, P>,
	parent_query: Option<&Query>,
	child_query: Option<&Query>,
	db: &dyn Database,
) -> SeedingResult<AttachReport> {
	let parent_query = parent_query.cloned().unwrap_or_else(Query::of::<P>);
	let child_query = child_query.cloned().unwrap_or_else(Query::of::<C>);
	let parent_table = P::table();

	let mut report = AttachReport::default();
	for mut child in db.fetch_all(&child_query).await? {
		report.visited += 1;
		let parent = db
			.random(&parent_query)
			.await?
			.ok_or_else(|| crate::SeedingError::ordering(C::table_name(), P::table_name()))?;
		fk.assign(&mut child, &row_key(&parent, &parent_table)?);
		db.save(&C::table(), child).await?;
		report.linked += 1;
	}
	tracing::debug!(
		parent = P::table_name(),
		child = C::table_name(),
		linked = report.linked,
		"random parents attached"
	);
	Ok(report)
}

/// Gives every parent row `count` randomly chosen children.
///
/// When no child matches `child_query` before the first parent is processed,
/// every parent gets `count` freshly created children from `factory` instead;
/// without a factory that is an ordering violation.
/// Fewer candidates than `count` attaches all of them and logs a warning.
pub async fn attach_random_children<P: Model, C: Seedable>(
	fk: &ForeignKey<C, P>,
	count: usize,
	child_query: Option<&Query>,
	parent_query: Option<&Query>,
	factory: Option<&ModelFactory>,
	db: &dyn Database,
) -> SeedingResult<AttachReport> {
	let parent_query = parent_query.cloned().unwrap_or_else(Query::of::<P>);
	let child_query = child_query.cloned().unwrap_or_else(Query::of::<C>);
	let parent_table = P::table();
	let child_table = C::table();

	// Decided once: children created for one parent must not be sampled by the next.
	let create_fresh = count > 0 && db.count(&child_query).await? == 0;

	let mut report = AttachReport::default();
	for parent in db.fetch_all(&parent_query).await? {
		report.visited += 1;
		let parent_key = row_key(&parent, &parent_table)?;

		let children = if create_fresh {
			let Some(factory) = factory else {
				return Err(crate::SeedingError::ordering(
					P::table_name(),
					C::table_name(),
				));
			};
			let created = factory
				.create_batch::<C>(count, db)
				.await?
				.iter()
				.map(encode_model)
				.collect::<Result<Vec<_>, _>>()?;
			report.created += created.len();
			created
		} else {
			db.random_slice(&child_query, count).await?
		};
		warn_short(C::table_name(), count, children.len());

		for mut child in children {
			fk.assign(&mut child, &parent_key);
			db.save(&child_table, child).await?;
			report.linked += 1;
		}
	}
	tracing::debug!(
		parent = P::table_name(),
		child = C::table_name(),
		linked = report.linked,
		created = report.created,
		"random children attached"
	);
	Ok(report)
}

/// Assigns every child matched by `child_query` to each parent in turn.
///
/// The last parent processed ends up owning all matched children.
pub async fn attach_all_children<P: Model, C: Model>(
	fk: &ForeignKey<C, P>,
	child_query: Option<&Query>,
	parent_query: Option<&Query>,
	db: &dyn Database,
) -> SeedingResult<AttachReport> {
	let parent_query = parent_query.cloned().unwrap_or_else(Query::of::<P>);
	let child_query = child_query.cloned().unwrap_or_else(Query::of::<C>);
	let parent_table = P::table();
	let child_table = C::table();

	let mut report = AttachReport::default();
	for parent in db.fetch_all(&parent_query).await? {
		report.visited += 1;
		let parent_key = row_key(&parent, &parent_table)?;
		for mut child in db.fetch_all(&child_query).await? {
			fk.assign(&mut child, &parent_key);
			db.save(&child_table, child).await?;
			report.linked += 1;
		}
	}
	Ok(report)
}

/// Links rows of a many-to-many relation through pivot rows.
///
/// The driving side is chosen by `direction`; for each of its rows, `count`
/// rows of the other side are sampled and one pivot row per pair is created.
/// Pairs the pivot table already holds are skipped, so running twice does not
/// duplicate links. An empty sampled side is an ordering violation.
pub async fn attach_random_siblings<V: Pivot>(
	count: usize,
	direction: SiblingSeedDirection,
	left_query: Option<&Query>,
	right_query: Option<&Query>,
	db: &dyn Database,
) -> SeedingResult<AttachReport> {
	let left_query = left_query.cloned().unwrap_or_else(Query::of::<V::Left>);
	let right_query = right_query.cloned().unwrap_or_else(Query::of::<V::Right>);

	let mut report = AttachReport::default();
	match direction {
		SiblingSeedDirection::LeftToRight => {
			for left in db.fetch_all(&left_query).await? {
				report.visited += 1;
				let left_key = typed_key::<V::Left>(&left)?;
				let rights = sample::<V>(&right_query, count, V::Right::table_name(), db).await?;
				for right in &rights {
					if link_pair::<V>(&left_key, &typed_key::<V::Right>(right)?, db).await? {
						report.linked += 1;
					}
				}
			}
		}
		SiblingSeedDirection::RightToLeft => {
			for right in db.fetch_all(&right_query).await? {
				report.visited += 1;
				let right_key = typed_key::<V::Right>(&right)?;
				let lefts = sample::<V>(&left_query, count, V::Left::table_name(), db).await?;
				for left in &lefts {
					if link_pair::<V>(&typed_key::<V::Left>(left)?, &right_key, db).await? {
						report.linked += 1;
					}
				}
			}
		}
	}
	tracing::debug!(
		pivot = V::table_name(),
		?direction,
		linked = report.linked,
		"siblings attached"
	);
	Ok(report)
}

/// Inserts the pivot row for `(left, right)` unless one exists; true if inserted.
async fn link_pair<V: Pivot>(
	left: &<V::Left as Model>::PrimaryKey,
	right: &<V::Right as Model>::PrimaryKey,
	db: &dyn Database,
) -> SeedingResult<bool> {
	let existing = Query::of::<V>()
		.filter(Filter::eq(V::left_key(), left.to_record_id().to_value()))
		.filter(Filter::eq(V::right_key(), right.to_record_id().to_value()));
	if db.count(&existing).await? > 0 {
		return Ok(false);
	}
	db.create_model(&V::link(left, right)).await?;
	Ok(true)
}

async fn sample<V: Pivot>(
	query: &Query,
	count: usize,
	dependency: &str,
	db: &dyn Database,
) -> SeedingResult<Vec<Record>> {
	let rows = db.random_slice(query, count).await?;
	if rows.is_empty() && count > 0 {
		return Err(crate::SeedingError::ordering(V::table_name(), dependency));
	}
	warn_short(V::table_name(), count, rows.len());
	Ok(rows)
}
