//! In-process frame transport.

use std::sync::Arc;

use async_trait::async_trait;
use formaudit_protocols::{
    FrameMatch, FrameResponder, FrameTransport, InspectRequest, TransportError, TreeNode,
};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

/// Broadcasts inspect requests to every registered frame.
///
/// All matching frames capture concurrently. The first frame matched by
/// name answers; otherwise the first frame matched by URL does.
#[derive(Clone, Default)]
pub struct FrameHub {
    responders: Vec<Arc<dyn FrameResponder>>,
}

impl FrameHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responders(responders: impl IntoIterator<Item = Arc<dyn FrameResponder>>) -> Self {
        Self {
            responders: responders.into_iter().collect(),
        }
    }

    pub fn register(&mut self, responder: Arc<dyn FrameResponder>) {
        self.responders.push(responder);
    }

    pub fn len(&self) -> usize {
        self.responders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responders.is_empty()
    }
}

impl std::fmt::Debug for FrameHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameHub")
            .field(
                "frames",
                &self
                    .responders
                    .iter()
                    .map(|r| r.identity())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[async_trait]
impl FrameTransport for FrameHub {
    async fn request(&self, request: InspectRequest) -> Result<TreeNode, TransportError> {
        let mut pending: FuturesUnordered<_> = self
            .responders
            .iter()
            .filter_map(|responder| {
                let matched = responder.identity().matches(&request)?;
                Some(async move { (matched, responder.inspect(self).await) })
            })
            .collect();

        if pending.is_empty() {
            return Err(TransportError::NoResponder {
                name: request.name,
                url: request.url,
            });
        }
        debug!(
            "Inspect request (name: {:?}, url: {:?}) matched {} frame(s)",
            request.name,
            request.url,
            pending.len()
        );

        let mut by_url = None;
        while let Some((matched, tree)) = pending.next().await {
            match matched {
                FrameMatch::Name => return Ok(tree),
                FrameMatch::Url if by_url.is_none() => by_url = Some(tree),
                FrameMatch::Url => {}
            }
        }
        by_url.ok_or(TransportError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use formaudit_protocols::FrameIdentity;

    use super::*;

    struct StaticFrame {
        identity: FrameIdentity,
        delay: Duration,
        reply: TreeNode,
    }

    impl StaticFrame {
        fn new(name: &str, url: &str, text: &str) -> Arc<dyn FrameResponder> {
            Self::delayed(name, url, text, Duration::ZERO)
        }

        fn delayed(name: &str, url: &str, text: &str, delay: Duration) -> Arc<dyn FrameResponder> {
            Arc::new(Self {
                identity: FrameIdentity::new(name, url),
                delay,
                reply: TreeNode::text(text),
            })
        }
    }

    #[async_trait]
    impl FrameResponder for StaticFrame {
        fn identity(&self) -> &FrameIdentity {
            &self.identity
        }

        async fn inspect(&self, _transport: &dyn FrameTransport) -> TreeNode {
            tokio::time::sleep(self.delay).await;
            self.reply.clone()
        }
    }

    fn text(tree: &TreeNode) -> &str {
        tree.text.as_deref().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_no_match() {
        let hub = FrameHub::with_responders([StaticFrame::new("a", "https://a/", "a")]);
        let err = hub
            .request(InspectRequest::new("b", "https://b/"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::NoResponder {
                name: "b".into(),
                url: "https://b/".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_name_beats_faster_url_match() {
        let hub = FrameHub::with_responders([
            StaticFrame::delayed("", "https://pay/", "by-url", Duration::from_millis(1)),
            StaticFrame::delayed("pay", "https://elsewhere/", "by-name", Duration::from_millis(50)),
        ]);
        let reply = hub
            .request(InspectRequest::new("pay", "https://pay/"))
            .await
            .unwrap();
        assert_eq!(text(&reply), "by-name");
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_url_reply_wins() {
        let hub = FrameHub::with_responders([
            StaticFrame::delayed("", "https://pay/", "slow", Duration::from_millis(20)),
            StaticFrame::delayed("", "https://pay/", "fast", Duration::from_millis(5)),
        ]);
        let reply = hub
            .request(InspectRequest::new("", "https://pay/"))
            .await
            .unwrap();
        assert_eq!(text(&reply), "fast");
    }

    #[tokio::test]
    async fn test_debug_lists_frames() {
        let mut hub = FrameHub::new();
        assert!(hub.is_empty());
        hub.register(StaticFrame::new("a", "https://a/", "a"));
        assert_eq!(hub.len(), 1);
        assert!(format!("{:?}", hub).contains("https://a/"));
    }
}
