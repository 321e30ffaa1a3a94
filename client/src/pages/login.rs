//! Login page for travelers, transporters and administrators.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::session::Role;
use crate::state::auth::AuthState;

const MISSING_FIELDS: &str = "Saisissez votre e-mail et votre mot de passe.";
const INVALID_EMAIL: &str = "Adresse e-mail invalide.";

fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.ends_with('.') => {
            Ok((email.to_owned(), password.to_owned()))
        }
        _ => Err(INVALID_EMAIL),
    }
}

fn role_title(role: Role) -> &'static str {
    match role {
        Role::User => "Espace voyageur",
        Role::Transporter => "Espace transporteur",
        Role::Admin => "Administration",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::User);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: follow the return URL or go to the dashboard.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if crate::session::browser::redirect_if_authenticated().is_some() {
            return;
        }
        if let Some(store) = crate::session::browser::credential_store() {
            role.set(crate::session::login::preselected_role(&store, &crate::session::redirect::BrowserNavigator));
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(pair) => pair,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Connexion...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match crate::net::api::login(&email_value, &password_value, role.get_untracked()).await {
                Ok(session) => crate::session::browser::complete_login(&session).map_err(|e| e.to_string()),
                Err(e) => Err(e),
            };
            match result {
                Ok(_) => crate::state::auth::refresh(auth),
                Err(e) => {
                    info.set(format!("Échec de la connexion : {e}"));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value, auth);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Billettigue"</h1>
                <p class="login-card__subtitle">{move || role_title(role.get())}</p>
                <div class="login-tabs">
                    {Role::ALL
                        .into_iter()
                        .map(|r| {
                            view! {
                                <button
                                    type="button"
                                    class=move || if role.get() == r { "login-tab login-tab--active" } else { "login-tab" }
                                    on:click=move |_| role.set(r)
                                >
                                    {role_title(r)}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="vous@exemple.fr"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Mot de passe"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Se connecter"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
