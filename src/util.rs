use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::error::Error;

/// Return the area to draw in: [`DISPLAY_SIZE`][consts::DISPLAY_SIZE],
/// enlarged as needed to hold `content` plus one line above and below
pub(crate) fn get_display_area(buffer_area: Rect, content: Size) -> Rect {
    let size = Size {
        width: consts::DISPLAY_SIZE.width.max(content.width),
        height: consts::DISPLAY_SIZE
            .height
            .max(content.height.saturating_add(2)),
    };
    center_rect(buffer_area, size)
}

/// Return a `Rect` of the given size centered within `area`, shrunk if
/// necessary to fit
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [inner] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [inner] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(inner);
    inner
}

/// Render an error and all of its sources as a single line, outermost first
pub(crate) fn error_chain<E: Error + ?Sized>(e: &E) -> String {
    let mut s = e.to_string();
    let mut source = e.source();
    while let Some(src) = source {
        s.push_str(": ");
        s.push_str(&src.to_string());
        source = src.source();
    }
    s
}
