//! Public landing page.
//!
//! Open to everyone. Shows a notice when the visitor lands here after a
//! logout (`?logout=` or `?emergency=true`).

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::profile_menu::ProfileMenu;

#[component]
pub fn HomePage() -> impl IntoView {
    let query = use_query_map();
    let notice = move || {
        let q = query.read();
        if q.get("emergency").is_some_and(|v| v == "true") {
            Some("Votre session a été fermée. Reconnectez-vous si nécessaire.")
        } else if q.get("logout").is_some() {
            Some("Vous êtes déconnecté.")
        } else {
            None
        }
    };

    view! {
        <div class="home-page">
            <header class="home-header">
                <span class="home-header__brand">"Billettigue"</span>
                <ProfileMenu/>
            </header>
            {move || notice().map(|text| view! { <p class="home-notice">{text}</p> })}
            <main class="home-hero">
                <h1>"Réservez vos billets de bus, train, avion et bateau"</h1>
                <a class="home-hero__cta" href="/pages/login.html">"Se connecter"</a>
            </main>
        </div>
    }
}
