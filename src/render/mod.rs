mod canvas;
mod stage;
mod terminal;

pub use canvas::{Canvas, Region};
pub use stage::Stage;
pub use terminal::{RenderError, TerminalPresenter};
