use crate::prelude::*;

/// Online/offline toggle over a shared store.
///
/// Button: `status.toggle`.
#[derive(Clone, Debug)]
pub struct StatusToggle {
    /// Shared status, `true` while online.
    pub online: Store<bool>,
}

impl Component for StatusToggle {
    fn compose(&self, cx: &Scope) -> View {
        use_subscription(cx, &self.online);

        let online = self.online.get();
        let toggle = self.online.clone();

        View::group([
            View::heading("Status"),
            if online {
                View::text("Status: Online")
            } else {
                View::text("Status: Offline")
            },
            View::button(
                "status.toggle",
                if online { "Go offline" } else { "Go online" },
                move || toggle.update(|online| *online = !*online),
            ),
        ])
    }
}
