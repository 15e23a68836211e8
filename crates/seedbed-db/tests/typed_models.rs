//! Typed model round-trips through the in-memory backend.

use rstest::*;
use seedbed_db::{
	Database, DatabaseError, DatabaseExt, Filter, ForeignKey, MemoryDatabase, Model, Pivot,
	Query, RecordId,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Author {
	id: Option<i64>,
	name: String,
}

impl Model for Author {
	type PrimaryKey = i64;

	fn table_name() -> &'static str {
		"authors"
	}

	fn primary_key(&self) -> Option<&i64> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: i64) {
		self.id = Some(value);
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Book {
	id: Option<Uuid>,
	title: String,
	author_id: Option<i64>,
}

impl Model for Book {
	type PrimaryKey = Uuid;

	fn table_name() -> &'static str {
		"books"
	}

	fn primary_key(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: Uuid) {
		self.id = Some(value);
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Authorship {
	id: Option<i64>,
	author_id: i64,
	book_id: Uuid,
}

impl Model for Authorship {
	type PrimaryKey = i64;

	fn table_name() -> &'static str {
		"authorships"
	}

	fn primary_key(&self) -> Option<&i64> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: i64) {
		self.id = Some(value);
	}
}

impl Pivot for Authorship {
	type Left = Author;
	type Right = Book;

	fn left_key() -> &'static str {
		"author_id"
	}

	fn right_key() -> &'static str {
		"book_id"
	}

	fn link(left: &i64, right: &Uuid) -> Self {
		Self {
			id: None,
			author_id: *left,
			book_id: *right,
		}
	}
}

#[fixture]
fn db() -> MemoryDatabase {
	MemoryDatabase::with_seed(42)
}

#[rstest]
#[tokio::test]
async fn test_create_and_find_model(db: MemoryDatabase) {
	let author = Author {
		id: None,
		name: "Le Guin".to_string(),
	};
	let stored = db.create_model(&author).await.unwrap();
	assert_eq!(stored.id, Some(1));

	let found: Option<Author> = db.find_model::<Author>(&1).await.unwrap();
	assert_eq!(found, Some(stored));
	assert_eq!(db.find_model::<Author>(&2).await.unwrap(), None);
}

#[rstest]
#[tokio::test]
async fn test_uuid_keys_are_generated(db: MemoryDatabase) {
	let book = Book {
		id: None,
		title: "The Dispossessed".to_string(),
		author_id: None,
	};
	let first = db.create_model(&book).await.unwrap();
	let second = db.create_model(&book).await.unwrap();
	assert!(first.id.is_some());
	assert_ne!(first.id, second.id);
}

#[rstest]
#[tokio::test]
async fn test_save_model_requires_key(db: MemoryDatabase) {
	let author = Author {
		id: None,
		name: "anon".to_string(),
	};
	let result = db.save_model(&author).await;
	assert!(matches!(result, Err(DatabaseError::MissingPrimaryKey(_))));
}

#[rstest]
#[tokio::test]
async fn test_foreign_key_assignment_persists(db: MemoryDatabase) {
	let author = db
		.create_model(&Author {
			id: None,
			name: "Butler".to_string(),
		})
		.await
		.unwrap();
	let book = db
		.create_model(&Book {
			id: None,
			title: "Kindred".to_string(),
			author_id: None,
		})
		.await
		.unwrap();

	let fk: ForeignKey<Book, Author> = ForeignKey::new("author_id");
	let mut record = db
		.find(&Book::table(), &RecordId::from(book.id.unwrap()))
		.await
		.unwrap()
		.unwrap();
	fk.assign(&mut record, &RecordId::Int(author.id.unwrap()));
	db.save(&Book::table(), record).await.unwrap();

	let linked = Query::of::<Book>().filter(Filter::eq("author_id", author.id.unwrap()));
	let books: Vec<Book> = db.all_models(&linked).await.unwrap();
	assert_eq!(books.len(), 1);
	assert_eq!(books[0].title, "Kindred");
}

#[rstest]
#[tokio::test]
async fn test_pivot_rows_link_both_sides(db: MemoryDatabase) {
	let author = db
		.create_model(&Author {
			id: None,
			name: "Jemisin".to_string(),
		})
		.await
		.unwrap();
	let book = db
		.create_model(&Book {
			id: None,
			title: "The Fifth Season".to_string(),
			author_id: None,
		})
		.await
		.unwrap();

	let link = Authorship::link(author.id.as_ref().unwrap(), book.id.as_ref().unwrap());
	db.create_model(&link).await.unwrap();

	let query = Query::of::<Authorship>().filter(Filter::eq(
		Authorship::right_key(),
		book.id.unwrap().to_string(),
	));
	let rows: Vec<Authorship> = db.all_models(&query).await.unwrap();
	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].author_id, author.id.unwrap());
}

#[rstest]
#[tokio::test]
async fn test_decode_error_names_table(db: MemoryDatabase) {
	db.create(
		&Author::table(),
		serde_json::json!({"name": 12}).as_object().cloned().unwrap(),
	)
	.await
	.unwrap();
	let result = db.all_models::<Author>(&Query::of::<Author>()).await;
	match result {
		Err(DatabaseError::Decode { table, .. }) => assert_eq!(table, "authors"),
		other => panic!("expected decode error, got {:?}", other),
	}
}
