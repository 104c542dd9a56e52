pub mod domain;
pub mod ports;

pub use domain::{Notification, Progress, RecommendationProfile, Resource, Step, User, COLLECTIONS};
pub use ports::{DocumentStore, StoreError, StoreResult};
