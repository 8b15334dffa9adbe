//! Typed command table
//!
//! Every back-office action is one `Command` variant. `execute` is the single
//! entry point: it fails closed without a principal, checks the variant's
//! capability, then hands the typed input to the owning service.

use serde::{Deserialize, Serialize};

use super::fines_service::{self, FinePeriod, FinePeriodRow};
use super::inventory_service::{self, BookUpdate};
use super::registrar_service::{self, NewMember, NewStaff, Registration};
use super::report_service::{
    self, ActiveMember, FineListing, MemberBorrows, MonthlySummary, PopularBook, TopAuthor,
};
use crate::domain::authorization::{self, Capability};
use crate::domain::{DomainError, NewBook, Principal, YesNo};
use crate::infrastructure::AppState;
use crate::models::BookListing;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    AddBook(NewBook),
    UpdateBook(BookUpdate),
    DeleteBook { book_id: i32 },
    CheckBookBorrowed { book_id: i32 },
    CheckBookAvailable { book_id: i32 },
    CheckMemberFines { member_id: i32 },
    FinesPeriod(FinePeriod),
    AddMember(NewMember),
    AddStaff(NewStaff),
    ListBooks,
    ListFines,
    MembersWithBorrows,
    BorrowingSummary,
    PopularBooks,
    TopAuthors,
    ActiveMembers,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBook(_) => "add_book",
            Command::UpdateBook(_) => "update_book",
            Command::DeleteBook { .. } => "delete_book",
            Command::CheckBookBorrowed { .. } => "check_book_borrowed",
            Command::CheckBookAvailable { .. } => "check_book_available",
            Command::CheckMemberFines { .. } => "check_member_fines",
            Command::FinesPeriod(_) => "fines_period",
            Command::AddMember(_) => "add_member",
            Command::AddStaff(_) => "add_staff",
            Command::ListBooks => "list_books",
            Command::ListFines => "list_fines",
            Command::MembersWithBorrows => "members_with_borrows",
            Command::BorrowingSummary => "borrowing_summary",
            Command::PopularBooks => "popular_books",
            Command::TopAuthors => "top_authors",
            Command::ActiveMembers => "active_members",
        }
    }

    /// Ownership rules (a member asking about their own fines) are checked
    /// by the service on top of this.
    pub fn required_capability(&self) -> Capability {
        match self {
            Command::CheckBookBorrowed { .. }
            | Command::CheckBookAvailable { .. }
            | Command::CheckMemberFines { .. }
            | Command::ListBooks
            | Command::PopularBooks => Capability::Authenticated,
            Command::AddStaff(_) => Capability::ManageStaff,
            Command::AddBook(_)
            | Command::UpdateBook(_)
            | Command::DeleteBook { .. }
            | Command::FinesPeriod(_)
            | Command::AddMember(_)
            | Command::ListFines
            | Command::MembersWithBorrows
            | Command::BorrowingSummary
            | Command::TopAuthors
            | Command::ActiveMembers => Capability::Privileged,
        }
    }
}

/// What a command produced, ready for the presentation boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Message(String),
    Registered(Registration),
    Answer(YesNo),
    Books(Vec<BookListing>),
    Fines(Vec<FineListing>),
    FinesInPeriod(Vec<FinePeriodRow>),
    Members(Vec<MemberBorrows>),
    MonthlySummary(Vec<MonthlySummary>),
    PopularBooks(Vec<PopularBook>),
    TopAuthors(Vec<TopAuthor>),
    ActiveMembers(Vec<ActiveMember>),
}

pub async fn execute(
    state: &AppState,
    principal: Option<&Principal>,
    command: Command,
) -> Result<Outcome, DomainError> {
    let principal = authorization::authenticated(principal)?;
    authorization::require(principal, command.required_capability())?;

    tracing::debug!(
        "Executing {} for user {} ({})",
        command.name(),
        principal.user_id,
        principal.role
    );

    let repo = state.book_repo.as_ref();
    let db = state.db();

    let outcome = match command {
        Command::AddBook(book) => {
            inventory_service::add_book(repo, principal, book).await?;
            Outcome::Message("Book added successfully.".to_string())
        }
        Command::UpdateBook(update) => {
            inventory_service::update_book(repo, principal, update).await?;
            Outcome::Message("Book updated successfully.".to_string())
        }
        Command::DeleteBook { book_id } => {
            inventory_service::delete_book(repo, principal, book_id).await?;
            Outcome::Message("Book deleted successfully.".to_string())
        }
        Command::CheckBookBorrowed { book_id } => {
            Outcome::Answer(inventory_service::check_borrowed(repo, book_id).await?)
        }
        Command::CheckBookAvailable { book_id } => {
            Outcome::Answer(inventory_service::check_available(repo, book_id).await?)
        }
        Command::CheckMemberFines { member_id } => Outcome::Answer(
            fines_service::member_has_unpaid_fines(db, principal, member_id).await?,
        ),
        Command::FinesPeriod(period) => {
            Outcome::FinesInPeriod(fines_service::fines_in_period(db, principal, period).await?)
        }
        Command::AddMember(member) => {
            Outcome::Registered(registrar_service::add_member(db, principal, member).await?)
        }
        Command::AddStaff(staff) => {
            Outcome::Registered(registrar_service::add_staff(db, principal, staff).await?)
        }
        Command::ListBooks => Outcome::Books(inventory_service::list_books(repo).await?),
        Command::ListFines => Outcome::Fines(report_service::all_fines(db, principal).await?),
        Command::MembersWithBorrows => {
            Outcome::Members(report_service::members_with_borrows(db, principal).await?)
        }
        Command::BorrowingSummary => {
            Outcome::MonthlySummary(report_service::borrowing_summary(db, principal).await?)
        }
        Command::PopularBooks => Outcome::PopularBooks(report_service::popular_books(db).await?),
        Command::TopAuthors => {
            Outcome::TopAuthors(report_service::top_authors(db, principal).await?)
        }
        Command::ActiveMembers => {
            Outcome::ActiveMembers(report_service::active_members(db, principal).await?)
        }
    };

    Ok(outcome)
}
