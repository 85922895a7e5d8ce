use std::{io, time::Duration};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use sodium as na;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Widget},
    Frame, Terminal,
};

use rewindttt::{GameState, Mark, Status, TicTacToe};

fn main() -> io::Result<()> {
    let ctx = na::SodiumCtx::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (kb_input, game) = ctx.transaction(|| {
        let kb_input: na::StreamSink<String> = ctx.new_stream_sink();
        let game = TicTacToe::new(&ctx, &kb_input.stream());

        (kb_input, game)
    });

    let ui = Ui {
        game: game.game.clone(),
    };
    let res = run(&mut terminal, &ui, &kb_input);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    ui: &Ui,
    kb_input: &na::StreamSink<String>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui.draw(f))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            let game = ui.game.sample();
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char(square @ '1'..='9') => kb_input.send(square.to_string()),
                KeyCode::Char('g') => kb_input.send(String::from("jump 0")),
                KeyCode::Left if game.step_number() > 0 => {
                    kb_input.send(format!("jump {}", game.step_number() - 1))
                }
                KeyCode::Right if game.step_number() + 1 < game.steps() => {
                    kb_input.send(format!("jump {}", game.step_number() + 1))
                }
                _ => {}
            }
        }
    }
}

struct Ui {
    game: na::Cell<GameState>,
}

impl Ui {
    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let game = self.game.sample();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        self.draw_board(f, block.inner(chunks[0]), &game);
        f.render_widget(block, chunks[0]);

        let info = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
            .split(chunks[1]);

        let status = match game.status() {
            Status::Winner(mark) => format!("Winner: {:?}", mark),
            Status::Draw => String::from("Draw!"),
            Status::InProgress(mark) => format!("Next player: {:?}", mark),
        };
        let status =
            Paragraph::new(status).block(Block::default().title("Game Info").borders(Borders::ALL));
        f.render_widget(status, info[0]);

        // The move list from the history; Left/Right time travel follows it.
        let moves: Vec<ListItem> = (0..game.steps())
            .map(|step| {
                let desc = if step == 0 {
                    String::from("Go to game start")
                } else {
                    format!("Go to move #{}", step)
                };
                ListItem::new(desc)
            })
            .collect();
        let moves = List::new(moves)
            .block(Block::default().title("Moves").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut selected = ListState::default();
        selected.select(Some(game.step_number()));
        f.render_stateful_widget(moves, info[1], &mut selected);
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, area: Rect, game: &GameState) {
        let thirds = [
            Constraint::Percentage(5),
            Constraint::Percentage(29),
            Constraint::Percentage(34),
            Constraint::Percentage(30),
            Constraint::Percentage(5),
        ];
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(0)
            .constraints(thirds.as_ref())
            .split(area);

        let hchunks0 = Layout::default()
            .direction(Direction::Horizontal)
            .margin(0)
            .horizontal_margin(3)
            .constraints(thirds.as_ref())
            .split(vchunks[1]);
        let hchunks1 = Layout::default()
            .direction(Direction::Horizontal)
            .margin(0)
            .horizontal_margin(3)
            .constraints(thirds.as_ref())
            .split(vchunks[2]);
        let hchunks2 = Layout::default()
            .direction(Direction::Horizontal)
            .margin(0)
            .horizontal_margin(3)
            .constraints(thirds.as_ref())
            .split(vchunks[3]);

        // Numpad order: squares 7-8-9 across the top, 1-2-3 across the bottom.
        let board = game.current_board();
        let squares = [
            (
                board.square(6),
                hchunks0[1],
                Borders::RIGHT | Borders::BOTTOM,
            ),
            (board.square(7), hchunks0[2], Borders::ALL ^ Borders::TOP),
            (
                board.square(8),
                hchunks0[3],
                Borders::LEFT | Borders::BOTTOM,
            ),
            (board.square(3), hchunks1[1], Borders::ALL ^ Borders::LEFT),
            (board.square(4), hchunks1[2], Borders::ALL),
            (board.square(5), hchunks1[3], Borders::ALL ^ Borders::RIGHT),
            (board.square(0), hchunks2[1], Borders::RIGHT | Borders::TOP),
            (
                board.square(1),
                hchunks2[2],
                Borders::ALL ^ Borders::BOTTOM,
            ),
            (board.square(2), hchunks2[3], Borders::LEFT | Borders::TOP),
        ];

        for (mark, chunk, borders) in squares {
            let block = Block::default().borders(borders);
            f.render_widget(RenderMark(mark), block.inner(chunk));
            f.render_widget(block, chunk);
        }
    }
}

struct RenderMark(Option<Mark>);

impl Widget for RenderMark {
    fn render(self, area: Rect, buf: &mut tui::buffer::Buffer) {
        if let Some(mark) = self.0 {
            match mark {
                Mark::X => render_x(area, buf),
                Mark::O => render_o(area, buf),
            }
        }
    }
}

fn render_x(area: Rect, buf: &mut tui::buffer::Buffer) {
    const LEFT: &str = "\\@\\";
    const RIGHT: &str = "/@/";

    if area.height == 0 {
        return;
    }
    // In theory this should be the number of characters to go over for each line
    // -2 because the line is 3 characters wide
    let inv_slope = (area.width).div_euclid(area.height);
    for y in 0..area.height {
        let x_left = area.width.saturating_sub(5 + y * inv_slope);
        buf.set_string(area.x + x_left, area.y + y, RIGHT, Style::default());

        let x_right = y * inv_slope;
        buf.set_string(area.x + x_right, area.y + y, LEFT, Style::default());
    }
}

fn render_o(area: Rect, buf: &mut tui::buffer::Buffer) {
    let x_offset;
    let y_offset;
    if area.width >= area.height {
        x_offset = (area.width - area.height).div_euclid(2);
        y_offset = 0;
    } else {
        x_offset = 0;
        y_offset = (area.height - area.width).div_euclid(2);
    }

    let diameter = area.width.min(area.height);
    let radius = diameter.div_euclid(2);
    if radius == 0 {
        return;
    }
    let center_x = (area.x + radius + x_offset) as i32;
    let center_y = (area.y + radius + y_offset) as i32;

    let radius = radius as f32;
    let min_angle = (1.0 - 1.0 / radius).acos().to_radians();

    let mut angle = 0.0;

    while angle < std::f32::consts::PI {
        let (sin, cos) = angle.sin_cos();
        let x_offset = (radius * cos) as i32;
        let y_offset = (radius * sin) as i32;

        let x = center_x + x_offset;
        let y = center_y + y_offset;
        buf.get_mut(x as u16, y as u16).set_char('@');
        let y = center_y - y_offset;
        buf.get_mut(x as u16, y as u16).set_char('@');
        angle += min_angle;
    }
}
