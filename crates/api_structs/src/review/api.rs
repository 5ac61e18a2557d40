use chrono::NaiveDateTime;
use revisit_domain::{ReviewCycle, ReviewUrl};
use serde::{Deserialize, Serialize};

pub mod create_review {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub url: String,
        /// Device identifier fallback for clients that cannot set the
        /// `X-Device-Id` header
        pub identifier: Option<String>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub url: ReviewUrl,
        pub scheduled_ats: Vec<NaiveDateTime>,
    }

    impl APIResponse {
        pub fn new(url: ReviewUrl, cycles: &[ReviewCycle]) -> Self {
            Self {
                url,
                scheduled_ats: cycles.iter().map(|cycle| cycle.scheduled_at).collect(),
            }
        }
    }
}
