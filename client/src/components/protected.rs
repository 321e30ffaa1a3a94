//! Route wrapper that runs the role guard before showing its children.

use leptos::prelude::*;

/// Renders `children` only once the guard has allowed the current page.
///
/// The server never renders protected markup: storage is browser-only, so the
/// decision is made after hydration and the page stays blank until then.
/// On denial the guard has already started the redirect.
#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let allowed = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        allowed.set(crate::session::browser::guard_current_page());
    });

    view! {
        <Show when=move || allowed.get() fallback=|| view! { <div class="guard-pending" aria-busy="true"></div> }>
            {children()}
        </Show>
    }
}
