//! Circulation reports

use anyhow::Result;
use clap::Subcommand;

use super::output::{format_date, Output};
use crate::domain::{queries, today, Library};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Books currently overdue, most overdue first
    Overdue,

    /// Most-borrowed books
    Popular {
        /// How many books to show
        #[arg(long, default_value = "10")]
        count: usize,
    },
}

pub fn run(cmd: ReportCommands, library: &Library, output: &Output) -> Result<()> {
    match cmd {
        ReportCommands::Overdue => overdue(library, output),
        ReportCommands::Popular { count } => popular(library, output, count),
    }
}

fn overdue(library: &Library, output: &Output) -> Result<()> {
    let report = queries::overdue_report(library.state(), today());

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    if report.is_empty() {
        output.line("No overdue books! All loans are current.");
        return Ok(());
    }

    for (rank, entry) in report.iter().enumerate() {
        output.row(&[
            &format!("#{}", rank + 1),
            &entry.title,
            &entry.member_name,
            &format!("{} days overdue", entry.days_overdue),
            &format!("due {}", format_date(entry.loan.due_date)),
        ]);
    }
    Ok(())
}

fn popular(library: &Library, output: &Output, count: usize) -> Result<()> {
    let top = queries::popular_books(library.state(), count);

    if output.is_json() {
        output.data(&top);
        return Ok(());
    }

    if top.is_empty() {
        output.line("No books have been checked out yet.");
        return Ok(());
    }

    for (rank, book) in top.iter().enumerate() {
        output.row(&[
            &format!("#{}", rank + 1),
            &book.title,
            &book.author,
            &format!("{} checkouts", book.checkout_count),
            &book.status.to_string(),
        ]);
    }
    Ok(())
}

/// Library totals: the report page footer as a command
pub fn show_status(library: &Library, output: &Output) -> Result<()> {
    let summary = queries::summary(library.state(), today());

    if output.is_json() {
        output.data(&summary);
        return Ok(());
    }

    output.row(&["Total books", &summary.total_books.to_string()]);
    output.row(&["Books checked out", &summary.books_checked_out.to_string()]);
    output.row(&["Currently on loan", &summary.currently_on_loan.to_string()]);
    output.row(&["Overdue books", &summary.overdue.to_string()]);
    Ok(())
}
