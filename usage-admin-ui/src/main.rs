use dioxus::prelude::*;
use dioxus_primitives::toast::ToastProvider;

mod api;
mod components;
mod config;
mod pages;
mod platform;
mod widgets;

use pages::{Dashboard, Login};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::Dashboard {})]
    #[route("/manage")]
    Dashboard {},
    #[route("/manage/login")]
    Login {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| api::build_console(&config::load()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider { Router::<Route> {} }
    }
}
