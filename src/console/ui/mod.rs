pub mod components;
pub mod renderer;

/// Which region consumes plain keystrokes. The input line owns editing and
/// history recall; the visualization pane owns playback and paging keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Input,
    Visualization,
}
