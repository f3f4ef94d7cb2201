//! Request and response payloads

pub mod verification;

pub use verification::{
    ButtonDescriptor, CommandDescriptor, CreatePanelRequest, HealthResponse, InteractionResponse,
    PanelResponse, SendEmailRequest, VerifyCodeRequest,
};
