//! Catalog integration tests

use std::{fs, path::PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

use libris::{
    models::{CreateAuthor, CreateBook, CreatePatron},
    storage::{JsonFileStore, Snapshot, SnapshotStore},
    AppError, Services,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, d).expect("valid date")
}

/// Catalog with one author, a book of `copies` copies and one patron
fn library(copies: i32) -> (Services, i32, i32) {
    let mut services = Services::new();
    let author = services
        .add_author(CreateAuthor {
            name: "João Silva".to_string(),
            nationality: "Brazilian".to_string(),
        })
        .expect("author");
    let book = services
        .add_book(CreateBook {
            title: "Java Adventures".to_string(),
            isbn: "978-85-333-0123-4".to_string(),
            publication_year: 2020,
            publisher: "Dev Publications".to_string(),
            total_copies: copies,
            author_ids: vec![author.id],
        })
        .expect("book");
    let patron = services
        .add_patron(CreatePatron {
            name: "Ana Costa".to_string(),
            document: "111.111.111-11".to_string(),
            phone: "9988-7766".to_string(),
            email: "ana@email.com".to_string(),
        })
        .expect("patron");
    (services, book.id, patron.id)
}

fn available(services: &Services, book_id: i32) -> i32 {
    services.get_book(book_id).expect("book exists").available_copies
}

fn assert_copies_in_bounds(services: &Services) {
    for book in services.list_books() {
        assert!(book.available_copies >= 0);
        assert!(book.available_copies <= book.total_copies);
    }
}

fn scratch_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("libris-it-{}", Uuid::new_v4()))
        .join("library.json")
}

#[test]
fn test_borrow_until_no_copies_left() {
    let (mut services, book, patron) = library(2);

    services.borrow(book, patron, day(1)).expect("first borrow");
    assert_eq!(available(&services, book), 1);
    services.borrow(book, patron, day(1)).expect("second borrow");
    assert_eq!(available(&services, book), 0);

    let err = services.borrow(book, patron, day(1)).unwrap_err();
    assert!(matches!(err, AppError::Unavailable(_)));
    assert_eq!(available(&services, book), 0);
    assert_eq!(services.list_active_loans().len(), 2);
    assert_copies_in_bounds(&services);
}

#[test]
fn test_return_once_then_refused() {
    let (mut services, book, patron) = library(2);
    let first = services.borrow(book, patron, day(1)).expect("borrow");
    services.borrow(book, patron, day(1)).expect("borrow");

    services.return_loan(first.id, day(5)).expect("return");
    assert_eq!(available(&services, book), 1);
    assert_eq!(services.list_active_loans().len(), 1);

    let err = services.return_loan(first.id, day(6)).unwrap_err();
    assert!(matches!(err, AppError::InvalidLoan(_)));
    assert_eq!(available(&services, book), 1);
    assert_copies_in_bounds(&services);
}

#[test]
fn test_availability_never_drifts() {
    let (mut services, book, patron) = library(3);
    let mut open = Vec::new();

    for round in 0..10u32 {
        if round % 3 == 2 {
            if let Some(id) = open.pop() {
                services.return_loan(id, day(round + 1)).expect("return");
            }
        } else if let Ok(loan) = services.borrow(book, patron, day(round + 1)) {
            open.push(loan.id);
        }
        assert_copies_in_bounds(&services);
        let on_loan = services.list_active_loans().len() as i32;
        assert_eq!(available(&services, book), 3 - on_loan);
    }
}

#[test]
fn test_due_date_is_fourteen_days() {
    let (mut services, book, patron) = library(1);
    let loan = services.borrow(book, patron, day(20)).expect("borrow");
    assert_eq!(loan.due_on, NaiveDate::from_ymd_opt(2025, 3, 6).expect("valid date"));
    assert_eq!(loan.due_on - loan.borrowed_on, chrono::Duration::days(14));
}

#[test]
fn test_removal_blocked_by_active_loan() {
    let (mut services, book, patron) = library(1);
    let loan = services.borrow(book, patron, day(1)).expect("borrow");

    assert!(matches!(services.remove_book(book), Err(AppError::Conflict(_))));
    assert!(matches!(services.remove_patron(patron), Err(AppError::Conflict(_))));
    assert_eq!(services.list_books().len(), 1);
    assert_eq!(services.list_patrons().len(), 1);

    services.return_loan(loan.id, day(2)).expect("return");
    services.remove_book(book).expect("remove book");
    services.remove_patron(patron).expect("remove patron");
    assert!(services.list_books().is_empty());
    assert!(services.list_patrons().is_empty());
}

#[test]
fn test_snapshot_round_trip_through_file() {
    let path = scratch_file();
    let store = JsonFileStore::new(&path, true);

    let (mut services, book, patron) = library(2);
    let returned = services.borrow(book, patron, day(1)).expect("borrow");
    let active = services.borrow(book, patron, day(2)).expect("borrow");
    services.return_loan(returned.id, day(3)).expect("return");
    services.save(&store).expect("save");

    let mut reopened = Services::open(&store).expect("open");
    assert_eq!(reopened.list_authors(), services.list_authors());
    assert_eq!(reopened.list_books(), services.list_books());
    assert_eq!(reopened.list_patrons(), services.list_patrons());
    assert_eq!(reopened.list_loans(), services.list_loans());
    assert_eq!(reopened.list_active_loans(), vec![active.clone()]);

    // new IDs continue past everything in the snapshot
    let next = reopened.borrow(book, patron, day(4)).expect("borrow");
    assert!(next.id > active.id);
    let author = reopened
        .add_author(CreateAuthor {
            name: "Maria Souza".to_string(),
            nationality: "Portuguese".to_string(),
        })
        .expect("author");
    assert!(services.list_authors().iter().all(|a| a.id < author.id));

    fs::remove_dir_all(path.parent().expect("parent")).ok();
}

#[test]
fn test_open_without_file_starts_empty() {
    let store = JsonFileStore::new(scratch_file(), false);
    assert!(store.load().expect("load").is_none());

    let services = Services::open(&store).expect("open");
    assert!(services.list_authors().is_empty());
    assert!(services.list_active_loans().is_empty());
}

#[test]
fn test_open_rejects_inconsistent_snapshot() {
    let path = scratch_file();
    let store = JsonFileStore::new(&path, false);
    let (services, _, _) = library(1);
    let mut snapshot = services.repository().snapshot();
    snapshot.books[0].available_copies = 5;
    store.save(&snapshot).expect("save");

    let err = Services::open(&store).unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));

    fs::remove_dir_all(path.parent().expect("parent")).ok();
}

/// Save `snapshot` edited by `tamper` and expect `open` to refuse it
fn assert_open_refuses(tamper: impl FnOnce(&mut Snapshot)) {
    let path = scratch_file();
    let store = JsonFileStore::new(&path, false);
    let (mut services, book, patron) = library(2);
    services.borrow(book, patron, day(1)).expect("borrow");
    let mut snapshot = services.repository().snapshot();
    tamper(&mut snapshot);
    store.save(&snapshot).expect("save");

    let err = Services::open(&store).unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));

    fs::remove_dir_all(path.parent().expect("parent")).ok();
}

#[test]
fn test_open_rejects_largest_id() {
    assert_open_refuses(|snapshot| {
        snapshot.books[0].id = i32::MAX;
        snapshot.loans[0].book_id = i32::MAX;
    });
}

#[test]
fn test_open_rejects_copies_drifted_from_loans() {
    // two copies, one active loan, but both recorded as on the shelf
    assert_open_refuses(|snapshot| snapshot.books[0].available_copies = 2);
}

#[test]
fn test_open_rejects_unknown_author_and_bad_due_date() {
    assert_open_refuses(|snapshot| snapshot.books[0].author_ids = vec![42]);
    assert_open_refuses(|snapshot| snapshot.loans[0].due_on = day(28));
}
