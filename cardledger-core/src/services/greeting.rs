//! Greeting service - the `hello/{name}` handler
//!
//! Unrelated to the ledger: it only echoes a name and a fixed message into
//! a view model and never touches accounts or cards.

use serde::Serialize;

/// Message injected into every greeting view
pub const INJECTED_MESSAGE: &str = "This message was injected through the Controller";

/// View model produced for `hello/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelloView {
    pub view: &'static str,
    pub name: String,
    pub injected: String,
}

/// Stateless request handler for greetings
pub struct GreetingService {
    injected: String,
}

impl Default for GreetingService {
    fn default() -> Self {
        Self::new(INJECTED_MESSAGE)
    }
}

impl GreetingService {
    pub fn new(injected: impl Into<String>) -> Self {
        Self {
            injected: injected.into(),
        }
    }

    /// Route path this handler answers
    pub fn route(name: &str) -> String {
        format!("/hello/{}", name)
    }

    pub fn hello(&self, name: &str) -> HelloView {
        tracing::debug!(name, "in controller");
        HelloView {
            view: "helloSpring",
            name: name.to_string(),
            injected: self.injected.clone(),
        }
    }
}
