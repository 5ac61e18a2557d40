mod device;
mod member;
mod notification;
mod review;
mod review_cycle;
mod shared;

pub use device::{
    Device, DeviceActivationError, DeviceIdentifier, InvalidDeviceIdentifierError,
    ACTIVATION_WINDOW_MINUTES,
};
pub use member::{Email, InvalidEmailError, Member};
pub use notification::NotificationHistory;
pub use review::{InvalidReviewUrlError, Review, ReviewUrl};
pub use review_cycle::{
    delivery_time, InvalidNotificationStatusError, NotificationStatus, ReviewCycle,
    ReviewCycleInterval,
};
pub use shared::entity::{Entity, ID};
