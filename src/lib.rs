pub mod client;
pub mod console;
pub mod logging;

pub use client::{ClientError, HttpTransport, Interpretation, ResultItem, ResultSet, Transport};
pub use console::InteractiveConsole;
