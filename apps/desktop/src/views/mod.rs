mod admin;
mod detail;
mod home;
mod shell;

pub use admin::AdminForm;
pub use detail::DestinationDetail;
pub use home::Home;
pub use shell::Shell;

use dioxus::prelude::*;

/// Client routes. Every page renders inside the [`Shell`] layout.
#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/destination/:id")]
        DestinationDetail { id: String },
        #[route("/admin")]
        AdminForm {},
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn detail_route_carries_the_id_segment() {
        let route: Route = "/destination/abc123".parse().unwrap();
        assert_eq!(route, Route::DestinationDetail { id: "abc123".to_owned() });
        assert_eq!(Route::DestinationDetail { id: "x9".to_owned() }.to_string(), "/destination/x9");
        assert_eq!(Route::Home {}.to_string(), "/");
    }
}
