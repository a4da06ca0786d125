use scoutsync_test_utils::prelude::*;

use super::*;
use crate::model::feed::{FeedAlliance, FeedEvent, FeedMatch};

mod alliance;
mod event_match;
