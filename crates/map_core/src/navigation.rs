/// Page the promotional popups send visitors to.
pub const SIGNUP_PAGE: &str = "signup.html";

/// Capability: leave the current page for `target`.
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

/// Navigator for hosts that cannot leave the page; the request is only logged.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&mut self, target: &str) {
        tracing::info!(target_page = target, "navigation requested");
    }
}
