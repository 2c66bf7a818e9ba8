//! Selection observation lifecycle: attaching the controller's message sink
//! to a host's selection events, and detaching it again on unload.

use std::sync::mpsc::Sender;

use crate::messages::Msg;

/// Channel end that receives gesture messages from the host.
pub type GestureSink = Sender<Msg>;

/// Host-assigned identity for one registered sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Source of selection events, usually the host editor's workspace.
///
/// Implementations deliver [`Msg::PointerDown`], [`Msg::SelectionEnd`] and
/// [`Msg::SurfaceChanged`] to every registered sink until it is released.
/// Unknown ids passed to [`release`](Self::release) are ignored.
pub trait EditableSurfaceProvider {
    fn register(&mut self, sink: GestureSink) -> SubscriptionId;
    fn release(&mut self, id: SubscriptionId);
}

/// Handle for one active registration.
///
/// The host keeps delivering events until [`release`](Subscription::release)
/// hands the id back to the provider; dropping the handle does not detach
/// anything, it only logs the leak.
#[must_use = "release the subscription through the provider on shutdown"]
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    released: bool,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Detach from the provider. Consumes the handle.
    pub fn release(mut self, provider: &mut dyn EditableSurfaceProvider) {
        provider.release(self.id);
        self.released = true;
        tracing::debug!("selection observation released (id={})", self.id.0);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(
                "subscription {} dropped without release; host-side listeners remain attached",
                self.id.0
            );
        }
    }
}

/// Register `sink` with the provider and return the handle that owns the
/// registration.
pub fn observe_selections(
    provider: &mut dyn EditableSurfaceProvider,
    sink: GestureSink,
) -> Subscription {
    let id = provider.register(sink);
    tracing::debug!("selection observation attached (id={})", id.0);
    Subscription {
        id,
        released: false,
    }
}
