//! Authentication and authorization: credential hashing, session tokens,
//! token extraction and ownership predicates.

mod extract;
pub mod ownership;
pub mod password;
pub mod token;

pub use extract::{AuthClaims, RawToken, token_from_parts};
pub use token::{Claims, IssuedToken, Principal, Role, TokenIssuer};
