use crate::TestContext;

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn feed<'a>(&'a mut self) -> FeedFixtures<'a> {
        FeedFixtures { setup: self }
    }
}

pub struct FeedFixtures<'a> {
    pub setup: &'a mut TestContext,
}
