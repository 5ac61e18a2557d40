use super::IMemberRepo;
use revisit_domain::{Email, Member, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};

pub struct PostgresMemberRepo {
    pool: PgPool,
}

impl PostgresMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MemberRaw {
    member_uid: Uuid,
    email: String,
}

impl TryFrom<MemberRaw> for Member {
    type Error = anyhow::Error;

    fn try_from(raw: MemberRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.member_uid.into(),
            email: raw.email.parse()?,
        })
    }
}

#[async_trait::async_trait]
impl IMemberRepo for PostgresMemberRepo {
    async fn insert(&self, member: &Member) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members(member_uid, email)
            VALUES($1, $2)
            "#,
        )
        .bind(member.id.inner_ref())
        .bind(member.email.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, member_id: &ID) -> Option<Member> {
        sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE member_uid = $1
            "#,
        )
        .bind(member_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .and_then(|member| member.try_into().ok())
    }

    async fn find_by_email(&self, email: &Email) -> Option<Member> {
        sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await
        .ok()
        .and_then(|member| member.try_into().ok())
    }
}
