use scoutsync_test_utils::prelude::*;

use super::*;
