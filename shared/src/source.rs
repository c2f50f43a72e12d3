use async_trait::async_trait;

use crate::error::DataUnavailable;
use crate::progress::ProgressSnapshot;

/// Where snapshots come from.
///
/// `?Send` because the browser host runs every future on a single thread.
#[async_trait(?Send)]
pub trait SnapshotSource {
    async fn fetch(&self) -> Result<ProgressSnapshot, DataUnavailable>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct ScriptedSource {
        responses: RefCell<VecDeque<Result<ProgressSnapshot, DataUnavailable>>>,
    }

    #[async_trait(?Send)]
    impl SnapshotSource for ScriptedSource {
        async fn fetch(&self) -> Result<ProgressSnapshot, DataUnavailable> {
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(DataUnavailable::Network("script exhausted".to_string())))
        }
    }

    #[tokio::test]
    async fn test_source_trait_object() {
        let source: Box<dyn SnapshotSource> = Box::new(ScriptedSource {
            responses: RefCell::new(VecDeque::from(vec![
                Ok(ProgressSnapshot { count: 1, goal: 10 }),
                Err(DataUnavailable::Status(502)),
            ])),
        });

        assert_eq!(source.fetch().await, Ok(ProgressSnapshot { count: 1, goal: 10 }));
        assert_eq!(source.fetch().await, Err(DataUnavailable::Status(502)));
        assert!(matches!(source.fetch().await, Err(DataUnavailable::Network(_))));
    }
}
