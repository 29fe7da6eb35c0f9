pub use emailjs::{EmailJsTransport, EmailJsTransportConfig};

mod emailjs;
mod http;
