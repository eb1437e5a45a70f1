//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::auth::AuthService;
use crate::net::cycles::CycleService;
use crate::net::http::RestClient;
use crate::net::predictions::PredictionService;
use crate::net::session::BrowserStore;
use crate::net::symptoms::SymptomService;
use crate::pages::{
    dashboard::DashboardPage, forgot_password::ForgotPasswordPage, login::LoginPage,
    reset_password::ResetPasswordPage,
};
use crate::state::auth::AuthState;
#[cfg(feature = "csr")]
use crate::state::auth::restore_session;

pub type Http = RestClient<BrowserStore>;

/// Services shared with every page through context.
#[derive(Clone, Debug)]
pub struct AppServices {
    pub auth: AuthService<Http, BrowserStore>,
    pub cycles: CycleService<Http>,
    pub symptoms: SymptomService<Http>,
    pub predictions: PredictionService<Http>,
}

impl AppServices {
    pub fn new(config: &ClientConfig) -> Self {
        let api = RestClient::new(config.api_base_url.clone(), BrowserStore);
        let ml = RestClient::new(config.ml_base_url.clone(), BrowserStore);
        Self {
            auth: AuthService::new(api.clone(), BrowserStore),
            cycles: CycleService::new(api.clone()),
            symptoms: SymptomService::new(api),
            predictions: PredictionService::new(ml),
        }
    }
}

/// Root application component.
///
/// Seeds auth state from the persisted session, confirms any stored token
/// in the background, and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let services = AppServices::new(&ClientConfig::from_env());
    let auth = RwSignal::new(AuthState::pending(&services.auth));

    #[cfg(feature = "csr")]
    {
        if auth.get_untracked().loading {
            let auth_service = services.auth.clone();
            leptos::task::spawn_local(async move {
                let restored = restore_session(&auth_service).await;
                auth.set(restored);
            });
        }
    }

    provide_context(services);
    provide_context(auth);

    view! {
        <Title text="Cycletrack"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
