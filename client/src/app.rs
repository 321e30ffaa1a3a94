//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::dashboard::{AdminDashboardPage, TransporterDashboardPage, UserDashboardPage};
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::state::auth::{AuthState, install_storage_listener};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session mirror and sets up routing. Page URLs keep the
/// `.html` paths that links, bookmarks and return URLs already point at.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    // Storage only exists after hydration.
    #[cfg(feature = "hydrate")]
    Effect::new(move || crate::state::auth::refresh(auth));
    install_storage_listener(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/billettigue.css"/>
        <Title text="Billettigue"/>

        <Router>
            <Routes fallback=|| "Page introuvable.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("index.html") view=HomePage/>
                <Route path=(StaticSegment("pages"), StaticSegment("login.html")) view=LoginPage/>
                <Route path=(StaticSegment("pages"), StaticSegment("user-dashboard.html")) view=UserDashboardPage/>
                <Route
                    path=(StaticSegment("pages"), StaticSegment("transporter-dashboard.html"))
                    view=TransporterDashboardPage
                />
                <Route path=(StaticSegment("pages"), StaticSegment("admin-dashboard.html")) view=AdminDashboardPage/>
            </Routes>
        </Router>
    }
}
