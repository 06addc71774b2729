use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::store::Store;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Identifier type shared by every entity managed by a [`ResourceActor`].
pub type EntityId = i64;

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type CreatePayload: Send + Sync + Debug;
    type Replace: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> EntityId;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: EntityId, payload: Self::CreatePayload) -> Result<Self, String>;

    /// Checks a record that enters the store without going through `from_create`
    /// (seed data).
    fn validate(&self) -> Result<(), String> { Ok(()) }

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_replace(&mut self, replace: Self::Replace) -> Result<(), String>;
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

/// Failures raised by the store, the actor, or the channel between client and actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(EntityId),
    #[error("Duplicate id: {0}")]
    DuplicateId(EntityId),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: EntityId,
        respond_to: Response<Option<T>>,
    },
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Replace {
        id: EntityId,
        replace: T::Replace,
        respond_to: Response<T>,
    },
    Update {
        id: EntityId,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: EntityId,
        respond_to: Response<T>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns a [`Store`] and applies requests to it strictly one at a time.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Store<T>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, store: Store<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    pub async fn run(mut self) {
        info!(entity = std::any::type_name::<T>(), items = self.store.len(), "ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }
        info!(entity = std::any::type_name::<T>(), "ResourceActor stopped");
    }

    fn handle(&mut self, msg: ResourceRequest<T>) {
        match msg {
            ResourceRequest::List { respond_to } => {
                let _ = respond_to.send(Ok(self.store.list().to_vec()));
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.find_by_id(id).cloned();
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Create { payload, respond_to } => {
                let result = self.store.insert(payload);
                match &result {
                    Ok(item) => info!(id = item.id(), "Item created"),
                    Err(e) => warn!(error = %e, "Create rejected"),
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Replace { id, replace, respond_to } => {
                let result = self.store.replace(id, replace);
                if result.is_ok() {
                    info!(id, "Item replaced");
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Update { id, patch, respond_to } => {
                let result = self.store.patch_fields(id, patch);
                if result.is_ok() {
                    info!(id, "Item patched");
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete { id, respond_to } => {
                let result = self.store.remove(id);
                match &result {
                    Ok(_) => info!(id, "Item deleted"),
                    Err(e) => debug!(id, error = %e, "Delete failed"),
                }
                let _ = respond_to.send(result);
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn replace(&self, id: EntityId, replace: T::Replace) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Replace { id, replace, respond_to }).await
    }

    pub async fn update(&self, id: EntityId, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: EntityId) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: EntityId,
        title: String,
        pinned: bool,
    }

    #[derive(Debug)]
    struct NoteCreate {
        title: String,
    }

    #[derive(Debug)]
    struct NotePatch {
        title: Option<String>,
        pinned: Option<bool>,
    }

    impl Entity for Note {
        type CreatePayload = NoteCreate;
        type Replace = NoteCreate;
        type Patch = NotePatch;

        fn id(&self) -> EntityId { self.id }

        fn from_create(id: EntityId, payload: NoteCreate) -> Result<Self, String> {
            Ok(Self { id, title: payload.title, pinned: false })
        }

        fn on_replace(&mut self, replace: NoteCreate) -> Result<(), String> {
            self.title = replace.title;
            Ok(())
        }

        fn on_update(&mut self, patch: NotePatch) -> Result<(), String> {
            if let Some(title) = patch.title {
                if title.is_empty() {
                    return Err("empty title".to_string());
                }
                self.title = title;
            }
            if let Some(pinned) = patch.pinned {
                self.pinned = pinned;
            }
            Ok(())
        }
    }

    fn spawn_actor() -> ResourceClient<Note> {
        let (actor, client) = ResourceActor::new(10, Store::new());
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_crud_cycle() {
        let client = spawn_actor();

        let first = client.create(NoteCreate { title: "first".into() }).await.unwrap();
        let second = client.create(NoteCreate { title: "second".into() }).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let patched = client
            .update(first.id, NotePatch { title: None, pinned: Some(true) })
            .await
            .unwrap();
        assert!(patched.pinned);
        assert_eq!(patched.title, "first");

        let replaced = client.replace(second.id, NoteCreate { title: "renamed".into() }).await.unwrap();
        assert_eq!(replaced.title, "renamed");

        let titles: Vec<String> = client.list().await.unwrap().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["first", "renamed"]);

        let deleted = client.delete(first.id).await.unwrap();
        assert_eq!(deleted.id, first.id);
        assert_eq!(client.get(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_patch_leaves_item_untouched() {
        let client = spawn_actor();
        let note = client.create(NoteCreate { title: "keep".into() }).await.unwrap();

        let result = client
            .update(note.id, NotePatch { title: Some(String::new()), pinned: Some(true) })
            .await;
        assert_eq!(result, Err(FrameworkError::Rejected("empty title".to_string())));

        let stored = client.get(note.id).await.unwrap().unwrap();
        assert_eq!(stored, note);
    }

    #[tokio::test]
    async fn test_missing_item_reports_not_found() {
        let client = spawn_actor();
        assert_eq!(client.delete(42).await, Err(FrameworkError::NotFound(42)));
        assert_eq!(
            client.replace(42, NoteCreate { title: "x".into() }).await,
            Err(FrameworkError::NotFound(42))
        );
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = ResourceActor::<Note>::new(1, Store::new());
        drop(actor);
        assert_eq!(client.list().await, Err(FrameworkError::ActorClosed));
    }
}
