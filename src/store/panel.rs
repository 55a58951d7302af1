use std::sync::{Arc, RwLock};

use tracing::{trace, warn};

use crate::{DecisionGraph, DecisionNode, ShareLock, nodes::NodeSpecification};

/// Identifier handed out by [`PanelStore::subscribe`].
pub type ListenerId = String;

pub type StoreListener<T> = Arc<dyn Fn(&T) + Send + Sync>;

macro_rules! dispatch_state {
    ($listeners:expr, $state:expr) => {
        // clone the list so listeners may (un)subscribe while being called
        let listeners = $listeners.read().unwrap().clone();
        for (_, listener) in listeners.iter() {
            (listener)($state);
        }
    };
}

/// Mutable state of one editor panel with change notification.
pub struct PanelStore<T> {
    state: ShareLock<T>,
    listeners: ShareLock<Vec<(ListenerId, StoreListener<T>)>>,
}

impl<T> Clone for PanelStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for PanelStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> PanelStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> T {
        self.state.read().unwrap().clone()
    }

    /// Replace the whole state and notify listeners.
    pub fn set_state(
        &self,
        state: T,
    ) {
        *self.state.write().unwrap() = state;
        self.notify();
    }

    /// Mutate the state in place and notify listeners.
    pub fn update<F>(
        &self,
        f: F,
    ) where
        F: FnOnce(&mut T),
    {
        {
            let mut state = self.state.write().unwrap();
            f(&mut state);
        }
        self.notify();
    }

    /// Register a listener called with the new state after every change.
    pub fn subscribe<F>(
        &self,
        listener: F,
    ) -> ListenerId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = nanoid::nanoid!();
        self.listeners.write().unwrap().push((id.clone(), Arc::new(listener)));
        trace!(listener_id = %id, "store listener subscribed");
        id
    }

    /// Remove a listener. Returns false when `id` is not subscribed.
    pub fn unsubscribe(
        &self,
        id: &str,
    ) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| listener_id != id);
        before != listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap().len()
    }

    fn notify(&self) {
        let state = self.state();
        dispatch_state!(self.listeners, &state);
    }
}

impl<T: NodeSpecification + Clone + Send + Sync + 'static> PanelStore<T> {
    /// Create a store holding `node`'s content.
    pub fn from_node(node: &DecisionNode) -> Self {
        let store = Self::default();
        store.load_from_node(node);
        store
    }

    /// Replace the state with `node`'s content without notifying listeners.
    ///
    /// Absent or unreadable content resets the state to the defaults.
    pub fn load_from_node(
        &self,
        node: &DecisionNode,
    ) {
        let state = match &node.content {
            Some(content) => serde_json::from_value::<T>(content.clone()).unwrap_or_else(|err| {
                warn!(node_id = %node.id, error = %err, "unreadable node content, using defaults");
                T::default()
            }),
            None => T::default(),
        };
        *self.state.write().unwrap() = state;
    }

    /// Write every change into the content of node `node_id` of `graph`.
    ///
    /// A change made while the caller holds a guard on `graph` is not written
    /// back and only logs a warning.
    pub fn bind(
        &self,
        graph: ShareLock<DecisionGraph>,
        node_id: impl Into<String>,
    ) -> ListenerId {
        let node_id = node_id.into();
        self.subscribe(move |state: &T| {
            let content = match serde_json::to_value(state) {
                Ok(content) => content,
                Err(err) => {
                    warn!(node_id = %node_id, error = %err, "failed to serialize panel state");
                    return;
                }
            };
            let Ok(mut graph) = graph.try_write() else {
                warn!(node_id = %node_id, "decision graph is locked, panel state not synced");
                return;
            };
            if let Err(err) = graph.update_node(&node_id, |node| node.content = Some(content)) {
                warn!(error = %err, "failed to sync panel state");
            }
        })
    }
}
