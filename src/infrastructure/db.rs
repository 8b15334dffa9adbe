use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

/// Schema in dependency order. Every statement is idempotent.
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE,
        phone TEXT NOT NULL,
        address TEXT NOT NULL,
        join_date TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS staff (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE,
        role TEXT NOT NULL,
        hire_date TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS publishers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        author_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        publisher_id INTEGER NOT NULL,
        isbn TEXT NOT NULL,
        publish_year INTEGER NOT NULL,
        copies_total INTEGER NOT NULL,
        copies_available INTEGER NOT NULL CHECK (copies_available >= 0),
        shelf_location TEXT NOT NULL,
        FOREIGN KEY (author_id) REFERENCES authors(id),
        FOREIGN KEY (category_id) REFERENCES categories(id),
        FOREIGN KEY (publisher_id) REFERENCES publishers(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS borrowings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        book_id INTEGER NOT NULL,
        member_id INTEGER NOT NULL,
        borrow_date TEXT NOT NULL,
        due_date TEXT NOT NULL,
        return_date TEXT,
        status TEXT NOT NULL DEFAULT 'Borrowed',
        FOREIGN KEY (book_id) REFERENCES books(id),
        FOREIGN KEY (member_id) REFERENCES members(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_borrowings_book_id ON borrowings(book_id)",
    "CREATE INDEX IF NOT EXISTS idx_borrowings_member_id ON borrowings(member_id)",
    "CREATE INDEX IF NOT EXISTS idx_borrowings_borrow_date ON borrowings(borrow_date)",
    r#"
    CREATE TABLE IF NOT EXISTS fines (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        borrow_id INTEGER NOT NULL,
        amount REAL NOT NULL DEFAULT 0,
        paid TEXT NOT NULL DEFAULT 'No',
        FOREIGN KEY (borrow_id) REFERENCES borrowings(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_fines_borrow_id ON fines(borrow_id)",
];

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    // sqlx already enables this per connection
    db.execute(Statement::from_string(
        backend,
        "PRAGMA foreign_keys = ON".to_owned(),
    ))
    .await?;

    for sql in MIGRATIONS {
        db.execute(Statement::from_string(backend, sql.to_string()))
            .await?;
    }

    tracing::debug!("Applied {} schema statements", MIGRATIONS.len());

    Ok(())
}
