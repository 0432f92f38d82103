pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{Member, MemberPatch, NewMember};
pub use repository::{MemberRepository, SeaOrmMemberRepository};
pub use service::MembersService;
