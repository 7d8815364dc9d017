//! Member commands

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::{format_date, Output};
use crate::domain::{queries, today, Action, Library, MemberId};

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Register a new member
    Add {
        /// Given name
        first: String,

        /// Family name
        last: String,
    },

    /// List registered members
    List,
}

pub fn run(cmd: MemberCommands, library: &mut Library, output: &Output) -> Result<()> {
    match cmd {
        MemberCommands::Add { first, last } => add_member(library, output, first, last),
        MemberCommands::List => list_members(library, output),
    }
}

fn add_member(library: &mut Library, output: &Output, first: String, last: String) -> Result<()> {
    if first.trim().is_empty() || last.trim().is_empty() {
        bail!("First and last name are required");
    }

    library.dispatch(Action::AddMember {
        first_name: first,
        last_name: last,
    })?;

    if let Some(member) = library.state().members.last() {
        if output.is_json() {
            output.data(member);
        } else {
            output.success(&format!("Member added successfully! ({})", member.id));
        }
    }
    Ok(())
}

fn list_members(library: &Library, output: &Output) -> Result<()> {
    let members = &library.state().members;

    if output.is_json() {
        output.data(members);
        return Ok(());
    }

    if members.is_empty() {
        output.line("No members registered");
        return Ok(());
    }

    for member in members {
        output.row(&[&member.id.to_string(), &member.display_name()]);
    }
    Ok(())
}

/// Shows a member's active loans with due dates and overdue markers
pub fn show_loans(library: &Library, member: &str, output: &Output) -> Result<()> {
    let member_id: MemberId = member.parse()?;
    let state = library.state();

    if state.member(&member_id).is_none() {
        bail!("member {} not found", member_id);
    }

    let loans = queries::loans_for_member(state, &member_id);

    if output.is_json() {
        output.data(&loans);
        return Ok(());
    }

    if loans.is_empty() {
        output.line("No active loans");
        return Ok(());
    }

    let today = today();
    for loan in loans {
        let due = match loan.days_overdue(today) {
            days if days > 0 => format!("{} days overdue", days),
            _ => format!("due {}", format_date(loan.due_date)),
        };
        output.row(&[
            &queries::book_title(state, &loan.book_id),
            &format!("borrowed {}", format_date(loan.loan_date)),
            &due,
        ]);
    }
    Ok(())
}
