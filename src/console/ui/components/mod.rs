pub mod text_input;
pub mod transcript;
pub mod visualization;

#[cfg(test)]
mod transcript_test;

pub use text_input::TextInput;
pub use transcript::Transcript;
pub use visualization::Visualization;
