//! Service layer providing the member-records operations on top of models.
//! - Separates storage access (`MemberRepository`) from callers.
//! - Reuses entity definitions in the `models` crate.
//! - Never validates input; that is the HTTP layer's job.

pub mod errors;
pub mod member;
