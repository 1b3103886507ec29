//! Drawing a game snapshot on the terminal
use crate::consts;
use crate::engine::{Cell, LifecycleState, Snapshot};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

impl Widget for Snapshot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board_size = Size {
            width: self
                .grid_size
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: self.grid_size.saturating_add(2),
        };
        let display = get_display_area(area, board_size);
        let [score_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {}   Level: {}   Best: {}",
                self.score, self.level, self.high_score
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let board_area = center_rect(board_area, board_size);
        // The grid wraps around, so its edges are drawn dotted rather than
        // solid
        DottedBorder.render(board_area, buf);

        let mut grid = Canvas {
            area: board_area.inner(Margin::new(1, 1)),
            buf,
        };
        if let Some(food) = self.food {
            grid.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        for &c in self.snake.body() {
            grid.draw_cell(c, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        grid.draw_cell(
            self.snake.head(),
            consts::SNAKE_HEAD_SYMBOL,
            consts::SNAKE_STYLE,
        );
        if let Some(c) = self.collision {
            grid.draw_cell(c, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }

        self.message().render(msg_area, buf);
    }
}

impl Snapshot<'_> {
    /// The line of text shown beneath the grid
    fn message(&self) -> Line<'static> {
        match self.state {
            LifecycleState::NotStarted => Line::from_iter([
                Span::raw(" Press "),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(" to start — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            LifecycleState::Playing if self.paused => Line::from_iter([
                Span::raw(" — PAUSED — Resume ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(") — Reset ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            LifecycleState::Playing => Line::from_iter([
                Span::raw(" Steer ("),
                Span::styled("←↓↑→", consts::KEY_STYLE),
                Span::raw(") — Pause ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(") — Reset ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            LifecycleState::GameOver => Line::from_iter([
                Span::raw(" — GAME OVER — Restart ("),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            LifecycleState::LevelComplete => Line::from_iter([
                Span::raw(format!(
                    " — LEVEL {} COMPLETE — Continue (",
                    self.level.saturating_sub(1)
                )),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    /// Draw `symbol` in the leftmost column of grid cell `cell`.  Anything
    /// falling outside the canvas is clipped.
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Some(x) = cell
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(cell.y) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}
