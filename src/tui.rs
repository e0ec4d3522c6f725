use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use glam::Vec2;
use unicode_width::UnicodeWidthStr;

use zombie_maze::grid::Pos;
use zombie_maze::session::{survival_label, Phase, SessionState};

const CELL_W: usize = 2;
/// Cells whose light falls below this are drawn as fog.
const FOG_CUTOFF: f32 = 0.2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Zombie,
    Block,
    Street,
    Fog,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

pub enum Choice {
    Restart,
    Quit,
}

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Street,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

pub fn render(stdout: &mut Stdout, session: &SessionState, renderer: &mut Renderer) -> io::Result<()> {
    let grid = session.grid();
    let needed_h = (grid.height() + 2) as u16;
    let needed_w = (grid.width() * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let paused = if session.phase() == Phase::Paused {
        "  PAUSED"
    } else {
        ""
    };
    let hud = format!(
        "{}  Zombies: {}  Fog: {:.3}{}  (wasd/hjkl move, p pause, q quit)",
        survival_label(session.elapsed()),
        session.zombies().len(),
        session.fog().density(),
        paused
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let map = minimap(session);
    for z in 0..grid.height() {
        for x in 0..grid.width() {
            let idx = z * grid.width() + x;
            let cell = map[idx];
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, z, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

/// One glyph per grid cell: streets and blocks under the fog mask, then the
/// zombies and the player on top.
fn minimap(session: &SessionState) -> Vec<Cell> {
    let grid = session.grid();
    let frame = session.frame();
    let fog = session.fog();
    let player = session.player().position;
    let (cols, rows) = (grid.width(), grid.height());
    let caught = fog.is_caught();

    let mut cells = Vec::with_capacity(cols * rows);
    let mut visible = Vec::with_capacity(cols * rows);
    for z in 0..rows {
        for x in 0..cols {
            let pos = Pos::new(x, z);
            let light = fog.visibility(frame.cell_center(pos).distance(player));
            let lit = light >= FOG_CUTOFF;
            visible.push(lit);
            cells.push(if !lit {
                Cell {
                    glyph: Glyph::Fog,
                    color: if caught { Color::Red } else { Color::Grey },
                }
            } else if grid.is_blocked(pos) {
                Cell {
                    glyph: Glyph::Block,
                    color: Color::DarkGrey,
                }
            } else {
                Cell {
                    glyph: Glyph::Street,
                    color: Color::Reset,
                }
            });
        }
    }

    let screen_index = |position: Vec2| {
        let point = frame.to_minimap(position, cols as f32, rows as f32);
        let x = (point.x.floor().max(0.0) as usize).min(cols - 1);
        let z = (point.y.floor().max(0.0) as usize).min(rows - 1);
        z * cols + x
    };

    for zombie in session.zombies() {
        let idx = screen_index(zombie.position);
        if visible[idx] {
            cells[idx] = Cell {
                glyph: Glyph::Zombie,
                color: if caught { Color::Red } else { Color::Green },
            };
        }
    }
    cells[screen_index(player)] = Cell {
        glyph: Glyph::Player,
        color: Color::Yellow,
    };
    cells
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "😃",
        Glyph::Zombie => "🧟",
        Glyph::Block => "██",
        Glyph::Street => "  ",
        Glyph::Fog => "░░",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

pub fn render_caught(stdout: &mut Stdout, session: &SessionState) -> io::Result<Choice> {
    let grid = session.grid();
    let (term_w, term_h) = terminal::size()?;
    let needed_h = (grid.height() + 2) as u16;
    let needed_w = (grid.width() * CELL_W) as u16;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, needed_h))?;
    } else {
        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        stdout.queue(MoveTo(origin_x, origin_y + grid.height() as u16))?;
    }
    stdout.queue(SetForegroundColor(Color::Red))?;
    stdout.queue(Print(format!(
        "CAUGHT - {} (r to run again, q to quit)",
        survival_label(session.elapsed())
    )))?;
    stdout.queue(ResetColor)?;
    stdout.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(Choice::Quit),
                    KeyCode::Char('r') => return Ok(Choice::Restart),
                    _ => {}
                }
            }
        }
    }
}
