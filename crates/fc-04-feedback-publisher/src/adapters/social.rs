//! # Social-Post Strategy
//!
//! Looks up the target profile's `as:outbox` and appends an activity-stream
//! note, serialized as N-Triples, under a random post id.

use crate::domain::{post_graph, FeedbackPost, PublishError, PublishResult};
use crate::ports::{FeedbackPublisher, PublishedFeedback};
use async_trait::async_trait;
use shared_crypto::random_entry_key;
use shared_store::{FetchedResource, NetworkSession, StoreError};
use shared_types::{vocab, DataAddress};
use tracing::info;

/// Posts feedback publicly to a target identity's outbox.
#[derive(Clone, Debug)]
pub struct SocialPostPublisher {
    target_uri: String,
    sender_uri: String,
}

impl SocialPostPublisher {
    pub fn new(target_uri: impl Into<String>, sender_uri: impl Into<String>) -> Self {
        Self {
            target_uri: target_uri.into(),
            sender_uri: sender_uri.into(),
        }
    }

    async fn locate_outbox(&self, session: &dyn NetworkSession) -> PublishResult<DataAddress> {
        let uri = self.target_uri.as_str();
        let resource = session.fetch(uri).await.map_err(|e| match e {
            StoreError::NotFound { uri } => PublishError::TargetNotFound { uri },
            other => PublishError::Network(other),
        })?;

        let profile = match resource {
            FetchedResource::Document(graph) => graph,
            other => {
                return Err(PublishError::NotAProfile {
                    uri: uri.to_string(),
                    kind: other.kind(),
                })
            }
        };

        profile
            .object_of(uri, vocab::AS_OUTBOX)
            .and_then(|term| term.as_iri())
            .and_then(|iri| DataAddress::parse_uri(iri).ok())
            .ok_or_else(|| PublishError::MissingOutbox {
                uri: uri.to_string(),
            })
    }
}

#[async_trait]
impl FeedbackPublisher for SocialPostPublisher {
    async fn publish(
        &self,
        session: &dyn NetworkSession,
        feedback: &FeedbackPost,
    ) -> PublishResult<PublishedFeedback> {
        let outbox = self.locate_outbox(session).await?;

        let post_id = random_entry_key();
        let post_uri = format!("{}#{}", outbox.to_uri(), post_id);
        let graph = post_graph(&post_uri, &self.sender_uri, feedback);

        session
            .insert_entry(&outbox, &post_id, graph.to_ntriples().into_bytes())
            .await
            .map_err(PublishError::Network)?;

        info!(feedback_target = %self.target_uri, %outbox, "Feedback posted");
        Ok(PublishedFeedback {
            collection: outbox,
            entry_key: post_id,
        })
    }
}
