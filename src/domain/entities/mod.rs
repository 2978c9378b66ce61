//! Domain entity definitions.

mod credentials;
mod draft;
mod member;
mod status;
mod transaction;

pub use credentials::{Credentials, Operator, Password};
pub use draft::MemberDraft;
pub use member::{Member, MemberField, MemberId, format_amount, format_optional_date};
pub use status::{MemberStatus, end_instant};
pub use transaction::{
    TIMESTAMP_FORMAT, Transaction, TransactionAction, TransactionStatus, sort_newest_first,
};
