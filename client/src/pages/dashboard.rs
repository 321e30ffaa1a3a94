//! Role dashboards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every dashboard sits behind `Protected`, so the role guard has already
//! accepted the visitor before anything here renders. Booking, trip and
//! account management live in the backend's own screens; these pages only
//! frame them with the session header.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::profile_menu::ProfileMenu;
use crate::components::protected::Protected;
use crate::session::Role;

fn dashboard_title(role: Role) -> &'static str {
    match role {
        Role::User => "Mes voyages",
        Role::Transporter => "Espace transporteur",
        Role::Admin => "Administration",
    }
}

/// Section headings shown on each dashboard, in display order.
fn dashboard_sections(role: Role) -> &'static [&'static str] {
    match role {
        Role::User => &["Réservations à venir", "Historique", "Mes billets"],
        Role::Transporter => &["Mes trajets", "Réservations reçues", "Ma compagnie"],
        Role::Admin => &["Comptes utilisateurs", "Transporteurs", "Statistiques"],
    }
}

#[component]
fn DashboardShell(role: Role) -> impl IntoView {
    view! {
        <Protected>
            <div class="dashboard-page">
                <header class="dashboard-header">
                    <a class="dashboard-header__brand" href="/">"Billettigue"</a>
                    <h1>{dashboard_title(role)}</h1>
                    <ProfileMenu/>
                </header>
                <main class="dashboard-grid">
                    {dashboard_sections(role)
                        .iter()
                        .map(|title| {
                            view! {
                                <section class="dashboard-card">
                                    <h2>{*title}</h2>
                                </section>
                            }
                        })
                        .collect::<Vec<_>>()}
                </main>
            </div>
        </Protected>
    }
}

#[component]
pub fn UserDashboardPage() -> impl IntoView {
    view! { <DashboardShell role=Role::User/> }
}

#[component]
pub fn TransporterDashboardPage() -> impl IntoView {
    view! { <DashboardShell role=Role::Transporter/> }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! { <DashboardShell role=Role::Admin/> }
}
