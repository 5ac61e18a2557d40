mod member;
mod review;
mod status;

pub mod dtos {
    pub use crate::member::dtos::*;
}

pub use crate::member::api::*;
pub use crate::review::api::*;
pub use crate::status::api::*;
