// Client side of the generation flow: the multi-step wizard, the captions
// form, and the gateway both of them use to reach the API.

pub mod captions;
pub mod gateway;
pub mod wizard;

pub use gateway::{GatewayError, GenerationGateway, HttpGateway};
pub use wizard::{Wizard, WizardError, WizardStep};
