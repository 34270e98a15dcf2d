mod bus;
mod events;
mod handlers;

pub use bus::{EventBus, SubscriptionId};
pub use events::StoreEvent;
pub use handlers::{SaveRedirect, picture_url};

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &StoreEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&StoreEvent) + Send,
{
    fn handle_event(&mut self, event: &StoreEvent) {
        self(event)
    }
}
