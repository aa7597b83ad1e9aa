use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::router::Screen;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavigationOperation {
    ScreenChanged { from: Screen, to: Screen },
}

impl Operation for NavigationOperation {
    type Output = ();
}

/// Tells the shell which screen is now visible, so it can run transitions
/// and move accessibility focus. Fire-and-forget.
pub struct Navigator<Ev> {
    context: CapabilityContext<NavigationOperation, Ev>,
}

impl<Ev> Capability<Ev> for Navigator<Ev> {
    type Operation = NavigationOperation;
    type MappedSelf<MappedEv> = Navigator<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Navigator::new(self.context.map_event(f))
    }
}

impl<Ev> Navigator<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<NavigationOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn screen_changed(&self, from: Screen, to: Screen) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(NavigationOperation::ScreenChanged { from, to })
                .await;
        });
    }
}
