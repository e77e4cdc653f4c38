use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event as CtEvent, KeyCode, KeyEventKind};
use simplelog::{Config, LevelFilter, WriteLogger};
use tuimenu::{Event, Menu, MenuConfig, MenuOption, MenuRegistry, Rect, Terminal};

const FILE_TRIGGER: Rect = Rect::new(2, 1, 12, 1);
const FRUIT_TRIGGER: Rect = Rect::new(20, 1, 18, 1);
const IDLE_POLL: Duration = Duration::from_millis(500);

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let status = Rc::new(RefCell::new(String::from("Press 'q' to quit")));
    let registry = MenuRegistry::new();
    let mut menus = build_menus(&registry, &status).map_err(std::io::Error::other)?;

    let mut term = Terminal::new()?;

    loop {
        draw(&mut term, &mut menus, &status.borrow())?;

        let timeout = menus
            .iter()
            .filter_map(|menu| menu.next_deadline())
            .min()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        for raw in term.poll(Some(timeout))? {
            if let CtEvent::Key(key) = &raw
                && key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('q')
            {
                return Ok(());
            }

            let Some(event) = Event::from_crossterm(&raw) else {
                continue;
            };
            let now = Instant::now();
            for menu in menus.iter_mut() {
                if menu.handle_event(&event, now).is_consumed() {
                    break;
                }
            }
        }

        let now = Instant::now();
        for menu in menus.iter_mut() {
            menu.tick(now);
        }
    }
}

fn build_menus(
    registry: &MenuRegistry,
    status: &Rc<RefCell<String>>,
) -> Result<Vec<Menu>, tuimenu::MenuError> {
    let file_status = Rc::clone(status);
    let mut file = Menu::new(registry, file_options(), MenuConfig::new())?
        .on_change(move |id| *file_status.borrow_mut() = format!("File: {}", id));
    file.set_trigger_rect(FILE_TRIGGER);

    let fruit_status = Rc::clone(status);
    let clear_status = Rc::clone(status);
    let mut fruit = Menu::new(
        registry,
        fruit_options(),
        MenuConfig::new().hover().clearable(),
    )?
    .on_change(move |id| *fruit_status.borrow_mut() = format!("Fruit: {}", id))
    .on_clear(move || *clear_status.borrow_mut() = String::from("Fruit cleared"));
    fruit.set_trigger_rect(FRUIT_TRIGGER);

    Ok(vec![file, fruit])
}

fn draw(term: &mut Terminal, menus: &mut [Menu], status: &str) -> std::io::Result<()> {
    let (_, height) = term.size()?;
    term.clear();

    for menu in menus.iter() {
        let trigger = menu.trigger_rect();
        let label = trigger_label(menu);
        term.text(trigger.x, trigger.y, &label, menu.is_open());
    }
    for menu in menus.iter_mut() {
        menu.render_on(term);
        menu.clear_dirty();
    }
    term.text(2, height.saturating_sub(1), status, false);

    term.flush()
}

fn trigger_label(menu: &Menu) -> String {
    let width = usize::from(menu.trigger_rect().width);
    let text = match menu.value() {
        Some(value) => format!("[{}", value),
        None if menu.mode() == tuimenu::ActivationMode::Hover => String::from("[hover me"),
        None => String::from("[File"),
    };
    let mut label: String = text.chars().take(width.saturating_sub(2)).collect();
    while label.chars().count() < width.saturating_sub(1) {
        label.push(' ');
    }
    // The last cell doubles as the clear affordance
    if menu.config().clearable && menu.value().is_some() {
        label.push('x');
    } else {
        label.push(']');
    }
    label
}

fn file_options() -> Vec<MenuOption> {
    vec![
        MenuOption::new("file", "File").children([
            MenuOption::new("new", "New").description("Ctrl+N"),
            MenuOption::new("open", "Open").description("Ctrl+O"),
            MenuOption::new("recent", "Recent").children([
                MenuOption::new("notes", "notes.md"),
                MenuOption::new("todo", "todo.txt"),
                MenuOption::new("older", "Older").children([
                    MenuOption::new("archive", "archive.tar"),
                    MenuOption::new("backup", "backup.zip"),
                ]),
            ]),
        ]),
        MenuOption::new("edit", "Edit").children([
            MenuOption::new("undo", "Undo"),
            MenuOption::new("redo", "Redo"),
        ]),
        MenuOption::new("exit", "Exit"),
    ]
}

fn fruit_options() -> Vec<MenuOption> {
    vec![
        MenuOption::new("apple", "Apple").icon("🍎"),
        MenuOption::new("banana", "Banana").icon("🍌"),
        MenuOption::new("citrus", "Citrus").children([
            MenuOption::new("lemon", "Lemon"),
            MenuOption::new("lime", "Lime"),
            MenuOption::new("orange", "Orange"),
        ]),
    ]
}
