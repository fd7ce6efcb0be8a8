use dioxus::prelude::*;

use store::ClientConfig;
use ui::views::admin::{AdminOverview, CategoriesView, CoursesView, UsersView};
use ui::views::instructor::{InstructorCourseDetail, InstructorCourses};
use ui::views::{LandingView, LoginView, RegisterView};
use ui::{NotificationHost, SessionProvider};
use views::{AdminLayout, InstructorLayout, NotFound};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    LandingView {},
    #[route("/login")]
    LoginView {},
    #[route("/register")]
    RegisterView {},
    #[nest("/admin")]
        #[layout(AdminLayout)]
            #[route("/")]
            AdminOverview {},
            #[route("/users")]
            UsersView {},
            #[route("/categories")]
            CategoriesView {},
            #[route("/courses")]
            CoursesView {},
        #[end_layout]
    #[end_nest]
    #[nest("/instruktur")]
        #[layout(InstructorLayout)]
            #[route("/")]
            InstructorCourses {},
            #[route("/courses/:course_id")]
            InstructorCourseDetail { course_id: i64 },
        #[end_layout]
    #[end_nest]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Optional TOML overriding the built-in client config, captured at build time.
const CLIENT_CONFIG: Option<&str> = option_env!("KURSUS_CLIENT_CONFIG");

fn client_config() -> ClientConfig {
    match CLIENT_CONFIG.map(ClientConfig::from_toml) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!("Ignoring KURSUS_CLIENT_CONFIG: {}", e);
            ClientConfig::default()
        }
        None => ClientConfig::default(),
    }
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        let config = client_config();
        tracing::info!(api = %config.api.base_url, "client configured");
        config
    });

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        document::Title { "Kursus" }

        NotificationHost {
            SessionProvider {
                config: config,
                Router::<Route> {}
            }
        }
    }
}
