use super::IMemberRepo;
use crate::repos::shared::{inmemory_repo::*, Collection};
use revisit_domain::{Email, Member, ID};

pub struct InMemoryMemberRepo {
    members: Collection<Member>,
}

impl InMemoryMemberRepo {
    pub fn new(members: Collection<Member>) -> Self {
        Self { members }
    }
}

#[async_trait::async_trait]
impl IMemberRepo for InMemoryMemberRepo {
    async fn insert(&self, member: &Member) -> anyhow::Result<()> {
        insert(member, &self.members);
        Ok(())
    }

    async fn find(&self, member_id: &ID) -> Option<Member> {
        find(member_id, &self.members)
    }

    async fn find_by_email(&self, email: &Email) -> Option<Member> {
        find_by(&self.members, |member| member.email == *email)
            .into_iter()
            .next()
    }
}
