use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui_collections::crossterm_input::input_event_from_crossterm;
use ratatui_collections::field::Record;
use ratatui_collections::field::Value;
use ratatui_collections::table::ColumnSpec;
use ratatui_collections::table::TableView;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Debug)]
struct Person {
    id: u32,
    name: String,
    age: u8,
    active: bool,
}

impl Record for Person {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "age" => Some(self.age.into()),
            "active" => Some(self.active.into()),
            _ => None,
        }
    }
}

const NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Dana", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];

fn main() -> io::Result<()> {
    let people: Vec<Person> = (0..5_000u32)
        .map(|i| Person {
            id: i,
            name: format!("{} {}", NAMES[i as usize % NAMES.len()], i / 10),
            age: (18 + (i * 7) % 60) as u8,
            active: i % 3 != 0,
        })
        .collect();

    let mut table = TableView::new(
        vec![
            ColumnSpec::new("Id", "id", 6),
            ColumnSpec::new("Name", "name", 14),
            ColumnSpec::new("Age", "age", 5),
            ColumnSpec::new("Active", "active", 8)
                .render_with(|p: &Person| if p.active { "yes" } else { "no" }.to_string()),
        ],
        people,
    );
    let last_selected = Rc::new(RefCell::new(String::from("-")));
    let sink = Rc::clone(&last_selected);
    table.on_select(move |p: &Person, i| *sink.borrow_mut() = format!("#{i} {}", p.name));

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut table, &last_selected);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    table: &mut TableView<Person>,
    last_selected: &Rc<RefCell<String>>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .areas(f.area());

            let block = Block::default()
                .title("TableView (j/k, PgUp/PgDn, g/G, Enter, 1-4 sort, q)")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            // Header plus both boundary markers.
            table.set_height((inner.height as usize).saturating_sub(3));
            f.render_widget(
                Paragraph::new(Text::from(table.render_styled())).block(block),
                main,
            );

            let pct = table.viewport().percent(table.len()).unwrap_or(100);
            let status_line = format!(
                "selected={}  scroll={pct}%",
                last_selected.borrow()
            );
            f.render_widget(Paragraph::new(status_line), status);
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        let pressed = match &ev {
            Event::Key(key) => shortcut(key),
            _ => None,
        };
        match pressed {
            Some(Shortcut::Quit) => return Ok(()),
            Some(Shortcut::SortColumn(idx)) => {
                let field = table.columns().get(idx).map(|c| c.field_key.clone());
                if let Some(field) = field {
                    table.sort(&field);
                }
            }
            None => {
                if let Some(input) = input_event_from_crossterm(ev) {
                    table.handle_event(&input);
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Shortcut {
    Quit,
    SortColumn(usize),
}

/// Demo-only keys. Releases and repeats are ignored so each press acts once.
fn shortcut(key: &crossterm::event::KeyEvent) -> Option<Shortcut> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') => Some(Shortcut::Quit),
        KeyCode::Char(c @ '1'..='4') => Some(Shortcut::SortColumn(c as usize - '1' as usize)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn shortcuts_fire_on_press_only() {
        let mut key = crossterm::event::KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(shortcut(&key), Some(Shortcut::SortColumn(1)));
        key.kind = KeyEventKind::Release;
        assert_eq!(shortcut(&key), None);
    }
}
