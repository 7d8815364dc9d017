//! Book catalog and circulation commands

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::{format_date, Output};
use crate::domain::{queries, Action, BookId, Library, MemberId};

#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a book to the catalog
    Add {
        /// Book title
        title: String,

        /// Author name
        author: String,

        /// Comma-separated tags (e.g. fiction,mystery,bestseller)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// List books, optionally filtered by title
    List {
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
    },

    /// Lend a book to a member (joins the waitlist when it is on loan)
    Lend {
        /// Book ID
        book: String,

        /// Member ID
        member: String,
    },

    /// Return a book, auto-lending to the waitlist head if present
    Return {
        /// Book ID
        book: String,
    },

    /// Add a member to a book's waitlist
    Waitlist {
        /// Book ID
        book: String,

        /// Member ID
        member: String,
    },
}

pub fn run(cmd: BookCommands, library: &mut Library, output: &Output) -> Result<()> {
    match cmd {
        BookCommands::Add {
            title,
            author,
            tags,
        } => add_book(library, output, title, author, tags),
        BookCommands::List { search } => list_books(library, output, search.as_deref()),
        BookCommands::Lend { book, member } => lend_book(library, output, &book, &member),
        BookCommands::Return { book } => return_book(library, output, &book),
        BookCommands::Waitlist { book, member } => {
            add_to_waitlist(library, output, &book, &member)
        }
    }
}

fn add_book(
    library: &mut Library,
    output: &Output,
    title: String,
    author: String,
    tags: Vec<String>,
) -> Result<()> {
    if title.trim().is_empty() || author.trim().is_empty() {
        bail!("Title and author are required");
    }

    library.dispatch(Action::AddBook {
        title,
        author,
        tags,
    })?;

    // The engine appends, so the newest book is last
    if let Some(book) = library.state().books.last() {
        if output.is_json() {
            output.data(book);
        } else {
            output.success(&format!("Book added successfully! ({})", book.id));
        }
    }
    Ok(())
}

fn list_books(library: &Library, output: &Output, search: Option<&str>) -> Result<()> {
    let state = library.state();
    let needle = search.map(str::to_lowercase);
    let books: Vec<_> = state
        .books
        .iter()
        .filter(|book| match &needle {
            Some(needle) => book.title.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    if output.is_json() {
        output.data(&books);
        return Ok(());
    }

    if books.is_empty() {
        output.line("No books found");
        return Ok(());
    }

    for book in books {
        let status = match &book.current_loan {
            Some(loan) => format!("on loan, due {}", format_date(loan.due_date)),
            None => "available".to_string(),
        };
        let waiting = if book.waitlist.is_empty() {
            String::new()
        } else {
            format!("{} waiting", book.waitlist.len())
        };
        output.row(&[
            &book.id.to_string(),
            &book.title,
            &book.author,
            &status,
            &waiting,
            &book.tags.join(","),
        ]);
    }
    Ok(())
}

/// The front-desk lending flow: lends when the book is on the shelf,
/// otherwise queues the member, refusing combinations the engine leaves to
/// the caller (current borrower or already-waitlisted member).
fn lend_book(library: &mut Library, output: &Output, book: &str, member: &str) -> Result<()> {
    let book_id: BookId = book.parse()?;
    let member_id: MemberId = member.parse()?;

    let existing = library.state().book(&book_id).cloned();
    if let Some(book) = existing {
        if book.is_borrowed_by(&member_id) {
            bail!("this member is already borrowing this book");
        }
        if book.is_waitlisted(&member_id) {
            bail!("this member is already on the waitlist for this book");
        }
        if !book.status.is_available() {
            library.dispatch(Action::AddToWaitlist { book_id, member_id })?;
            output.success(&format!(
                "\"{}\" is on loan; added to its waitlist",
                book.title
            ));
            return Ok(());
        }
    }

    library.dispatch(Action::LendBook { book_id, member_id })?;
    output.success("Book lent successfully!");
    Ok(())
}

fn return_book(library: &mut Library, output: &Output, book: &str) -> Result<()> {
    let book_id: BookId = book.parse()?;

    // Remember who is about to be promoted so the confirmation can name them
    let promoted = library
        .state()
        .book(&book_id)
        .and_then(|b| b.waitlist.first().cloned());

    library.dispatch(Action::ReturnBook { book_id })?;

    match promoted {
        Some(member_id) => {
            let name = queries::member_display_name(library.state(), &member_id);
            output.success(&format!("Book returned and automatically lent to {}!", name));
        }
        None => output.success("Book returned successfully!"),
    }
    Ok(())
}

fn add_to_waitlist(
    library: &mut Library,
    output: &Output,
    book: &str,
    member: &str,
) -> Result<()> {
    let book_id: BookId = book.parse()?;
    let member_id: MemberId = member.parse()?;

    library.dispatch(Action::AddToWaitlist { book_id, member_id })?;
    output.success("Added to waitlist successfully!");
    Ok(())
}
