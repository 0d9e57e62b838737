use resvg::usvg;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error("Can't draw box plot {0}")]
    Draw(String),
    #[error("Error parsing rendered svg {0}")]
    Svg(#[from] usvg::Error),
    #[error("Failed to make a {0}x{1} pixmap")]
    Pixmap(u32, u32),
    #[error("Error encoding png {0}")]
    Png(String),
}
