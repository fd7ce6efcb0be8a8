//! Authorization gate for protected routes.

use dioxus::prelude::*;
use store::{Role, Session};

use crate::session::use_session;

pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of checking a session against a route's allowed roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(&'static str),
}

/// An empty `roles` list admits any logged-in user.
pub fn authorize(session: &Session, roles: &[Role]) -> AccessDecision {
    let Some(role) = session.role() else {
        return AccessDecision::Redirect(LOGIN_ROUTE);
    };
    if roles.is_empty() || roles.contains(&role) {
        AccessDecision::Allow
    } else {
        AccessDecision::Redirect(role.home_route())
    }
}

/// Renders `children` only when the current session passes [`authorize`].
/// Otherwise replaces the current route and renders nothing.
///
/// The check follows the session signal, so a 401 anywhere in the subtree
/// (which clears the session) sends the user to the login page.
#[component]
pub fn RequireRole(#[props(default)] roles: Vec<Role>, children: Element) -> Element {
    let session = use_session();
    let nav = use_navigator();

    let decision = authorize(&session(), &roles);
    use_effect(use_reactive!(|decision| {
        if let AccessDecision::Redirect(target) = decision {
            tracing::debug!(target, "access denied, redirecting");
            nav.replace(target);
        }
    }));

    match decision {
        AccessDecision::Allow => rsx! { {children} },
        AccessDecision::Redirect(_) => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::session::{use_api, use_request_scope, AppClient, SessionProvider};
    use crate::testing::{html, logged_in_client, settle};
    use crate::NotificationHost;
    use api::{ApiResponse, Method};
    use dioxus_history::{History, MemoryHistory};
    use store::Credentials;

    #[derive(Routable, Clone, PartialEq, Debug)]
    enum GuardedRoute {
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/admin")]
        AdminArea {},
        #[route("/instruktur")]
        InstructorArea {},
    }

    #[component]
    fn Home() -> Element {
        rsx! { p { "home-page" } }
    }

    #[component]
    fn Login() -> Element {
        rsx! { p { "login-page" } }
    }

    #[component]
    fn AdminArea() -> Element {
        rsx! {
            RequireRole { roles: vec![Role::Admin], AdminPanel {} }
        }
    }

    #[component]
    fn InstructorArea() -> Element {
        rsx! {
            RequireRole { roles: vec![Role::Instruktur], p { "instructor-home" } }
        }
    }

    /// Loads users on mount, like the real admin pages do.
    #[component]
    fn AdminPanel() -> Element {
        let api = use_api();
        let scope = use_request_scope();
        use_hook(move || {
            spawn(async move {
                let _ = scope.run(api.list_users()).await;
            });
        });
        rsx! { p { "admin-secret" } }
    }

    fn app() -> Element {
        let client = use_context::<AppClient>();
        rsx! {
            NotificationHost {
                SessionProvider { client: client, Router::<GuardedRoute> {} }
            }
        }
    }

    fn mount(client: AppClient, path: &str) -> (VirtualDom, Rc<dyn History>) {
        let history: Rc<dyn History> = Rc::new(MemoryHistory::with_initial_path(path));
        let mut dom = VirtualDom::new(app)
            .with_root_context(client)
            .with_root_context(history.clone());
        dom.rebuild_in_place();
        (dom, history)
    }

    fn logged_in(role: Role) -> Session {
        Session::LoggedIn(Credentials {
            token: "t".into(),
            user_id: 1,
            role,
        })
    }

    #[test]
    fn test_logged_out_goes_to_login() {
        assert_eq!(
            authorize(&Session::LoggedOut, &[Role::Admin]),
            AccessDecision::Redirect("/login")
        );
        assert_eq!(
            authorize(&Session::LoggedOut, &[]),
            AccessDecision::Redirect("/login")
        );
    }

    #[test]
    fn test_roles_outside_allow_list_are_redirected() {
        for allowed in [vec![Role::Admin], vec![Role::Instruktur], vec![Role::Admin, Role::Instruktur]] {
            for role in Role::all() {
                let decision = authorize(&logged_in(role), &allowed);
                if allowed.contains(&role) {
                    assert_eq!(decision, AccessDecision::Allow);
                } else {
                    assert_eq!(decision, AccessDecision::Redirect(role.home_route()));
                }
            }
        }
    }

    #[test]
    fn test_instructor_on_admin_route_lands_on_instructor_home() {
        assert_eq!(
            authorize(&logged_in(Role::Instruktur), &[Role::Admin]),
            AccessDecision::Redirect("/instruktur")
        );
    }

    #[test]
    fn test_empty_allow_list_admits_any_session() {
        for role in Role::all() {
            assert_eq!(authorize(&logged_in(role), &[]), AccessDecision::Allow);
        }
    }

    #[tokio::test]
    async fn test_instructor_is_turned_away_from_admin_area() {
        let (client, mock) = logged_in_client(Role::Instruktur).await;
        let (mut dom, history) = mount(client, "/admin");
        settle(&mut dom).await;

        let page = html(&dom);
        assert!(!page.contains("admin-secret"));
        assert!(page.contains("instructor-home"));
        assert_eq!(history.current_route(), "/instruktur");
        assert!(mock.requests_to(Method::GET, "/users").is_empty());
    }

    #[tokio::test]
    async fn test_logged_out_visitor_is_sent_to_login() {
        let (client, _mock) = logged_in_client(Role::Admin).await;
        client.logout().await;
        let (mut dom, history) = mount(client, "/instruktur");
        settle(&mut dom).await;

        let page = html(&dom);
        assert!(!page.contains("instructor-home"));
        assert!(page.contains("login-page"));
        assert_eq!(history.current_route(), "/login");
    }

    #[tokio::test]
    async fn test_rejected_session_unmounts_guarded_view() {
        let (client, mock) = logged_in_client(Role::Admin).await;
        mock.on(Method::GET, "/users", ApiResponse::empty(401));
        let (mut dom, history) = mount(client.clone(), "/admin");
        settle(&mut dom).await;

        let page = html(&dom);
        assert_eq!(mock.requests_to(Method::GET, "/users").len(), 1);
        assert!(!client.is_authenticated());
        assert!(!page.contains("admin-secret"));
        assert!(page.contains("login-page"));
        assert!(page.contains("Sesi berakhir"));
        assert_eq!(history.current_route(), "/login");
    }
}
