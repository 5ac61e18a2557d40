mod inmemory;
mod postgres;

use revisit_domain::{Email, Member, ID};

pub use inmemory::InMemoryMemberRepo;
pub use postgres::PostgresMemberRepo;

#[async_trait::async_trait]
pub trait IMemberRepo: Send + Sync {
    async fn insert(&self, member: &Member) -> anyhow::Result<()>;
    async fn find(&self, member_id: &ID) -> Option<Member>;
    async fn find_by_email(&self, email: &Email) -> Option<Member>;
}
