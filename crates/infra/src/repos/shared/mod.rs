pub mod inmemory_repo;

use std::sync::{Arc, Mutex};

/// A collection backing the in-memory repositories. Shared between
/// repositories that must observe each other's writes, like the review
/// repo inserting cycles that the cycle repo later queries.
pub type Collection<T> = Arc<Mutex<Vec<T>>>;

pub fn new_collection<T>() -> Collection<T> {
    Arc::new(Mutex::new(Vec::new()))
}
