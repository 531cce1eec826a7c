//! Libris - library catalog command line
//!
//! Runs one catalog operation per invocation against the saved snapshot.

use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris::{
    config::AppConfig,
    error::{AppResult, ErrorResponse},
    models::{CreateAuthor, CreateBook, CreatePatron},
    storage::JsonFileStore,
    Services,
};

const USAGE: &str = "\
Usage: libris <command> [args]

Commands:
  add-author NAME [NATIONALITY]
  list-authors
  add-book TITLE ISBN YEAR PUBLISHER COPIES AUTHOR_ID[,AUTHOR_ID...]
  list-books
  remove-book BOOK_ID
  add-patron NAME [DOCUMENT] [PHONE] [EMAIL]
  list-patrons
  remove-patron PATRON_ID
  borrow BOOK_ID PATRON_ID
  return LOAN_ID
  list-active-loans
  list-loans";

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing; stdout is reserved for command output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}\n\n{}", message, USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    let store = JsonFileStore::new(&config.storage.data_file, config.storage.pretty);
    let (mut services, loaded) = match Services::open(&store) {
        Ok(services) => (services, true),
        Err(e) => {
            tracing::error!("Failed to load catalog from {}: {}", store.path().display(), e);
            (Services::new(), false)
        }
    };

    let today = Local::now().date_naive();
    let outcome = command.execute(&mut services, today);

    if command.is_mutation() && outcome.is_ok() {
        if loaded {
            if let Err(e) = services.save(&store) {
                tracing::error!("Failed to save catalog to {}: {}", store.path().display(), e);
            }
        } else {
            // Never overwrite a snapshot we could not read
            tracing::error!("Catalog not saved: the existing snapshot could not be loaded");
        }
    }

    match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&e))?);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// A caller-facing operation with already-parsed arguments
#[derive(Debug, Clone, PartialEq)]
enum Command {
    AddAuthor { name: String, nationality: String },
    ListAuthors,
    AddBook {
        title: String,
        isbn: String,
        publication_year: i32,
        publisher: String,
        total_copies: i32,
        author_ids: Vec<i32>,
    },
    ListBooks,
    RemoveBook(i32),
    AddPatron {
        name: String,
        document: String,
        phone: String,
        email: String,
    },
    ListPatrons,
    RemovePatron(i32),
    Borrow { book_id: i32, patron_id: i32 },
    Return(i32),
    ListActiveLoans,
    ListLoans,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, String> {
        let (name, rest) = args.split_first().ok_or("Missing command")?;
        let arg = |i: usize| {
            rest.get(i)
                .cloned()
                .ok_or(format!("{}: missing argument {}", name, i + 1))
        };
        let opt = |i: usize| rest.get(i).cloned().unwrap_or_default();
        let int = |i: usize| -> Result<i32, String> {
            let raw = arg(i)?;
            raw.trim()
                .parse()
                .map_err(|_| format!("{}: {:?} is not a number", name, raw))
        };

        let command = match name.as_str() {
            "add-author" => Command::AddAuthor {
                name: arg(0)?,
                nationality: opt(1),
            },
            "list-authors" => Command::ListAuthors,
            "add-book" => Command::AddBook {
                title: arg(0)?,
                isbn: arg(1)?,
                publication_year: int(2)?,
                publisher: arg(3)?,
                total_copies: int(4)?,
                author_ids: arg(5)?
                    .split(',')
                    .map(|id| {
                        id.trim()
                            .parse()
                            .map_err(|_| format!("{}: {:?} is not an author id", name, id))
                    })
                    .collect::<Result<_, _>>()?,
            },
            "list-books" => Command::ListBooks,
            "remove-book" => Command::RemoveBook(int(0)?),
            "add-patron" => Command::AddPatron {
                name: arg(0)?,
                document: opt(1),
                phone: opt(2),
                email: opt(3),
            },
            "list-patrons" => Command::ListPatrons,
            "remove-patron" => Command::RemovePatron(int(0)?),
            "borrow" => Command::Borrow {
                book_id: int(0)?,
                patron_id: int(1)?,
            },
            "return" => Command::Return(int(0)?),
            "list-active-loans" => Command::ListActiveLoans,
            "list-loans" => Command::ListLoans,
            other => return Err(format!("Unknown command {:?}", other)),
        };
        Ok(command)
    }

    fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Command::ListAuthors
                | Command::ListBooks
                | Command::ListPatrons
                | Command::ListActiveLoans
                | Command::ListLoans
        )
    }

    fn execute(&self, services: &mut Services, today: NaiveDate) -> AppResult<Value> {
        let value = match self.clone() {
            Command::AddAuthor { name, nationality } => {
                serde_json::to_value(services.add_author(CreateAuthor { name, nationality })?)?
            }
            Command::ListAuthors => serde_json::to_value(services.list_authors())?,
            Command::AddBook {
                title,
                isbn,
                publication_year,
                publisher,
                total_copies,
                author_ids,
            } => serde_json::to_value(services.add_book(CreateBook {
                title,
                isbn,
                publication_year,
                publisher,
                total_copies,
                author_ids,
            })?)?,
            Command::ListBooks => serde_json::to_value(services.list_books())?,
            Command::RemoveBook(id) => {
                services.remove_book(id)?;
                serde_json::json!({ "removed": id })
            }
            Command::AddPatron {
                name,
                document,
                phone,
                email,
            } => serde_json::to_value(services.add_patron(CreatePatron {
                name,
                document,
                phone,
                email,
            })?)?,
            Command::ListPatrons => serde_json::to_value(services.list_patrons())?,
            Command::RemovePatron(id) => {
                services.remove_patron(id)?;
                serde_json::json!({ "removed": id })
            }
            Command::Borrow { book_id, patron_id } => {
                serde_json::to_value(services.borrow(book_id, patron_id, today)?)?
            }
            Command::Return(id) => {
                services.return_loan(id, today)?;
                serde_json::json!({ "returned": id })
            }
            Command::ListActiveLoans => serde_json::to_value(services.active_loan_details(today))?,
            Command::ListLoans => serde_json::to_value(services.list_loans())?,
        };
        Ok(value)
    }
}
