//! Profile button with a dropdown of role-specific links and logout.

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Profile menu for the page header.
///
/// Text and link visibility come from `AuthState::display`; nothing here
/// reads storage directly.
#[component]
pub fn ProfileMenu() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let open = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let model = Memo::new(move |_| auth.get().display());

    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = crate::session::browser::logout().await;
            if let Some(warning) = crate::session::logout::logout_warning(outcome.as_ref()) {
                log::warn!("{warning}");
            }
            auth.set(AuthState { session: None, loaded: true });
        });
    };

    view! {
        <div class=move || if open.get() { "profile-menu profile-menu--open" } else { "profile-menu" }>
            <button class="profile-menu__toggle" on:click=move |_| open.update(|o| *o = !*o)>
                <span class="profile-menu__avatar">{move || model.get().initials}</span>
                <span class="profile-menu__labels">
                    <span class="profile-menu__primary">{move || model.get().primary}</span>
                    <span class="profile-menu__secondary">{move || model.get().secondary}</span>
                </span>
            </button>
            <Show when=move || open.get()>
                <ul class="profile-menu__list">
                    <Show when=move || model.get().menu.user_links>
                        <li><a href="/pages/user-dashboard.html">"Mes réservations"</a></li>
                    </Show>
                    <Show when=move || model.get().menu.transporter_links>
                        <li><a href="/pages/transporter-dashboard.html">"Mes trajets"</a></li>
                    </Show>
                    <Show when=move || model.get().menu.admin_links>
                        <li><a href="/pages/admin-dashboard.html">"Administration"</a></li>
                    </Show>
                    <Show when=move || model.get().menu.login>
                        <li><a href="/pages/login.html">"Se connecter"</a></li>
                    </Show>
                    <Show when=move || model.get().menu.logout>
                        <li>
                            <button class="profile-menu__logout" disabled=move || busy.get() on:click=on_logout>
                                "Se déconnecter"
                            </button>
                        </li>
                    </Show>
                </ul>
            </Show>
        </div>
    }
}
