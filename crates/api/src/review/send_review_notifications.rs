use crate::{
    error::RevisitError,
    shared::usecase::UseCase,
};
use revisit_domain::{delivery_time, Member, NotificationStatus, ReviewUrl, ID};
use revisit_infra::{render_review_email, DueReviewCycle, RevisitContext, REVIEW_EMAIL_SUBJECT};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// The daily dispatch run: collects every pending cycle scheduled for
/// today's delivery time, sends one digest email per member and
/// records the outcome per member group.
#[derive(Debug)]
pub struct SendReviewNotificationsUseCase {}

#[derive(Debug)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for RevisitError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct MemberReviewDigest {
    member: Member,
    cycle_ids: Vec<ID>,
    urls: Vec<ReviewUrl>,
}

/// Groups due cycles into one digest per member, in order of first
/// appearance. A member never gets more than one email per run.
fn group_by_member(due: Vec<DueReviewCycle>) -> Vec<MemberReviewDigest> {
    let mut groups: Vec<MemberReviewDigest> = Vec::new();
    for item in due {
        match groups
            .iter_mut()
            .find(|group| group.member.id == item.member.id)
        {
            Some(group) => {
                group.cycle_ids.push(item.cycle.id);
                group.urls.push(item.url);
            }
            None => groups.push(MemberReviewDigest {
                member: item.member,
                cycle_ids: vec![item.cycle.id],
                urls: vec![item.url],
            }),
        }
    }
    groups
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReviewNotificationsUseCase {
    type Response = DispatchSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReviewNotifications";

    async fn execute(&mut self, ctx: &RevisitContext) -> Result<Self::Response, Self::Error> {
        let target = ctx.sys.get_datetime().date().and_time(delivery_time());
        let due = ctx
            .repos
            .review_cycles
            .find_due_at(target)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let groups = group_by_member(due);
        let mut summary = DispatchSummary {
            attempted: groups.len(),
            sent: 0,
            failed: 0,
        };
        let send_timeout = Duration::from_secs(ctx.config.mail_send_timeout_secs);

        for group in groups {
            let body = render_review_email(&group.urls);
            let delivery = timeout(
                send_timeout,
                ctx.email.send(&group.member.email, REVIEW_EMAIL_SUBJECT, &body),
            )
            .await;

            // A failed group must not stop the remaining groups
            let status = match delivery {
                Ok(Ok(())) => NotificationStatus::Sent,
                Ok(Err(e)) => {
                    warn!(
                        "Review email to: {} failed. Error: {:?}",
                        group.member.email.to_masked_value(),
                        e
                    );
                    NotificationStatus::Failed
                }
                Err(_) => {
                    warn!(
                        "Review email to: {} timed out after {:?}",
                        group.member.email.to_masked_value(),
                        send_timeout
                    );
                    NotificationStatus::Failed
                }
            };
            match status {
                NotificationStatus::Sent => summary.sent += 1,
                _ => summary.failed += 1,
            }

            if let Err(e) = ctx
                .repos
                .notification_histories
                .record(&group.cycle_ids, status, ctx.sys.get_timestamp_millis())
                .await
            {
                error!(
                    "Unable to record notification outcome for member: {} Error: {:?}",
                    group.member.id, e
                );
            }
        }

        info!(
            "Review dispatch run at {} finished. Sent: {}/{} digests, failed: {}",
            target, summary.sent, summary.attempted, summary.failed
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use revisit_domain::{Member, Review, ReviewCycle, ReviewCycleInterval};
    use revisit_infra::{InMemoryEmailSender, ISys};
    use std::sync::Arc;

    struct StaticTimeSys {
        timestamp_millis: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.timestamp_millis
        }
    }

    // 2025-01-02T08:00:00Z, the day after the anchor date used below
    const DISPATCH_NOW: i64 = 1_735_804_800_000;

    fn dispatch_ctx(email_sender: Arc<InMemoryEmailSender>) -> RevisitContext {
        let mut ctx = RevisitContext::create_inmemory_with_email(email_sender);
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: DISPATCH_NOW,
        });
        ctx
    }

    async fn register_review(ctx: &RevisitContext, member: &Member, url: &str) -> Vec<ReviewCycle> {
        let review = Review::new(member.id.clone(), url.parse().unwrap(), 0);
        let anchor = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let cycles = ReviewCycleInterval::calculate_default(anchor)
            .into_iter()
            .map(|scheduled_at| ReviewCycle::new(review.id.clone(), scheduled_at))
            .collect::<Vec<_>>();
        ctx.repos
            .reviews
            .insert_with_schedule(&review, &cycles, &[])
            .await
            .unwrap();
        cycles
    }

    async fn insert_member(ctx: &RevisitContext, email: &str) -> Member {
        let member = Member::new(email.parse().unwrap());
        ctx.repos.members.insert(&member).await.unwrap();
        member
    }

    #[test]
    fn it_groups_due_cycles_per_member_in_first_appearance_order() {
        let alice = Member::new("alice@example.com".parse().unwrap());
        let bob = Member::new("bob@example.com".parse().unwrap());
        let scheduled_at = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_time(delivery_time());

        let due_item = |member: &Member, url: &str| DueReviewCycle {
            cycle: ReviewCycle::new(Default::default(), scheduled_at),
            url: url.parse().unwrap(),
            member: member.clone(),
        };

        let groups = group_by_member(vec![
            due_item(&alice, "https://example.com/a"),
            due_item(&bob, "https://example.com/b"),
            due_item(&alice, "https://example.com/c"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].member.id, alice.id);
        assert_eq!(groups[0].urls.len(), 2);
        assert_eq!(groups[0].cycle_ids.len(), 2);
        assert_eq!(groups[1].member.id, bob.id);
        assert_eq!(groups[1].urls.len(), 1);
    }

    #[test]
    fn it_produces_no_groups_for_no_due_cycles() {
        assert!(group_by_member(Vec::new()).is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn it_sends_one_digest_per_member_and_marks_cycles_sent() {
        let email_sender = Arc::new(InMemoryEmailSender::new());
        let ctx = dispatch_ctx(email_sender.clone());

        let alice = insert_member(&ctx, "alice@example.com").await;
        let alice_cycles_a = register_review(&ctx, &alice, "https://example.com/a").await;
        let alice_cycles_b = register_review(&ctx, &alice, "https://example.com/b").await;
        let bob = insert_member(&ctx, "bob@example.com").await;
        let bob_cycles = register_review(&ctx, &bob, "https://example.com/c").await;

        let summary = execute(SendReviewNotificationsUseCase {}, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 0);

        let sent = email_sender.sent();
        assert_eq!(sent.len(), 2);
        let alice_mail = sent.iter().find(|mail| mail.to == alice.email).unwrap();
        assert_eq!(alice_mail.subject, REVIEW_EMAIL_SUBJECT);
        assert!(alice_mail.body.contains("https://example.com/a"));
        assert!(alice_mail.body.contains("https://example.com/b"));

        // Only the day-1 cycle of each review was due
        for cycles in [&alice_cycles_a, &alice_cycles_b, &bob_cycles] {
            let cycle = ctx.repos.review_cycles.find(&cycles[0].id).await.unwrap();
            assert_eq!(cycle.status, NotificationStatus::Sent);
            let cycle = ctx.repos.review_cycles.find(&cycles[1].id).await.unwrap();
            assert_eq!(cycle.status, NotificationStatus::Pending);
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_keeps_sending_after_a_failed_group() {
        let email_sender = Arc::new(InMemoryEmailSender::new());
        let ctx = dispatch_ctx(email_sender.clone());

        let alice = insert_member(&ctx, "alice@example.com").await;
        let alice_cycles = register_review(&ctx, &alice, "https://example.com/a").await;
        let bob = insert_member(&ctx, "bob@example.com").await;
        let bob_cycles = register_review(&ctx, &bob, "https://example.com/b").await;
        email_sender.reject_recipient(&alice.email);

        let summary = execute(SendReviewNotificationsUseCase {}, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 1);

        let cycle = ctx
            .repos
            .review_cycles
            .find(&alice_cycles[0].id)
            .await
            .unwrap();
        assert_eq!(cycle.status, NotificationStatus::Failed);
        let histories = ctx
            .repos
            .notification_histories
            .find_by_cycle(&alice_cycles[0].id)
            .await;
        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].status, NotificationStatus::Failed);

        let cycle = ctx
            .repos
            .review_cycles
            .find(&bob_cycles[0].id)
            .await
            .unwrap();
        assert_eq!(cycle.status, NotificationStatus::Sent);
    }

    #[actix_web::main]
    #[test]
    async fn it_never_double_sends_on_rerun() {
        let email_sender = Arc::new(InMemoryEmailSender::new());
        let ctx = dispatch_ctx(email_sender.clone());

        let alice = insert_member(&ctx, "alice@example.com").await;
        register_review(&ctx, &alice, "https://example.com/a").await;

        let summary = execute(SendReviewNotificationsUseCase {}, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.sent, 1);

        // Operator replays the run for the same day
        let summary = execute(SendReviewNotificationsUseCase {}, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.attempted, 0);
        assert_eq!(email_sender.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn it_sends_nothing_when_nothing_is_due() {
        let email_sender = Arc::new(InMemoryEmailSender::new());
        let ctx = dispatch_ctx(email_sender.clone());

        let summary = execute(SendReviewNotificationsUseCase {}, &ctx)
            .await
            .unwrap();
        assert_eq!(summary.attempted, 0);
        assert!(email_sender.sent().is_empty());
    }
}
