use std::sync::Arc;

use service::member::{MemberRepository, MembersService};

/// Shared handler state; cloned per request, the service behind it is shared.
#[derive(Clone)]
pub struct ServerState {
    pub members: Arc<MembersService<dyn MemberRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { members: Arc::new(MembersService::new(repo)) }
    }
}
