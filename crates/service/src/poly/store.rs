use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{NewPolyObject, PolyObject};
use super::repository::PolyRepository;
use crate::errors::ServiceError;

struct Slot {
    seq: u64,
    object: PolyObject,
}

#[derive(Default)]
struct PolyState {
    next_seq: u64,
    objects: HashMap<String, Slot>,
}

/// Process-local poly-data collection. Contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryPolyStore {
    inner: Arc<RwLock<PolyState>>,
}

impl InMemoryPolyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl PolyRepository for InMemoryPolyStore {
    async fn list(&self) -> Vec<PolyObject> {
        let state = self.inner.read().await;
        let mut slots: Vec<&Slot> = state.objects.values().collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| s.object.clone()).collect()
    }

    #[instrument(skip(self, input), fields(entries = input.data.len()))]
    async fn create(&self, input: NewPolyObject) -> PolyObject {
        let mut state = self.inner.write().await;
        // uuid v4 collisions are not expected; re-roll anyway so ids stay unique
        let mut id = Uuid::new_v4().to_string();
        while state.objects.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        let object = PolyObject { id: id.clone(), data: input.data };
        state.objects.insert(id.clone(), Slot { seq, object: object.clone() });
        info!(%id, "poly_created");
        object
    }

    async fn get(&self, id: &str) -> Result<PolyObject, ServiceError> {
        let state = self.inner.read().await;
        state
            .objects
            .get(id)
            .map(|s| s.object.clone())
            .ok_or_else(|| ServiceError::not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> bool {
        let mut state = self.inner.write().await;
        let existed = state.objects.remove(id).is_some();
        if existed {
            info!(%id, "poly_deleted");
        } else {
            debug!(%id, "delete of unknown id ignored");
        }
        existed
    }

    async fn len(&self) -> usize {
        self.inner.read().await.objects.len()
    }
}
