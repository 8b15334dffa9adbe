pub mod author;
pub mod book;
pub mod borrowing;
pub mod category;
pub mod fine;
pub mod member;
pub mod publisher;
pub mod staff;
pub mod user;

pub use book::{Book, BookListing};
pub use borrowing::BorrowStatus;
