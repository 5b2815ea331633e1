//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod card;
mod greeting;
mod invoice;
mod scenario;

pub use card::CardIssuer;
pub use greeting::{GreetingService, HelloView, INJECTED_MESSAGE};
pub use invoice::InvoiceService;
pub use scenario::{ScenarioReport, ScenarioService, ScenarioStep};
