//! Line-oriented task board driver.
//!
//! # Responsibility
//! - Stand in for the browser surface: read commands from stdin, mount both
//!   columns, and report re-renders.
//! - Route every move through the drag protocol, never straight to the store.
//!
//! Commands:
//! - `add <title> | <description> | <people>`
//! - `move <title-or-id-prefix> <active|finished>`
//! - `list`, `help`, `quit`

use log::warn;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use taskboard_core::{
    init_from_config, BoardConfig, ColumnKind, DragGesture, DropOutcome, ListenerError,
    ProjectForm, ProjectList, RenderSurface, TransitionOutcome, WorkItem, WorkItemStatus,
    WorkItemStore,
};

const HELP: &str = "commands:
  add <title> | <description> | <people>
  move <title-or-id-prefix> <active|finished>
  list
  help
  quit";

struct StdoutSurface;

impl RenderSurface for StdoutSurface {
    fn render(
        &self,
        region_id: &str,
        _heading: &str,
        items: &[WorkItem],
    ) -> Result<(), ListenerError> {
        let mut out = io::stdout().lock();
        writeln!(out, "~ {region_id}: {} item(s)", items.len())
            .map_err(|err| ListenerError::new(format!("stdout write failed: {err}")))
    }
}

struct Board {
    store: &'static WorkItemStore,
    columns: Vec<Arc<ProjectList>>,
}

impl Board {
    fn mount() -> Result<Self, ListenerError> {
        let store = WorkItemStore::instance();
        let surface: Arc<dyn RenderSurface> = Arc::new(StdoutSurface);
        let columns = ColumnKind::ALL
            .into_iter()
            .map(|kind| ProjectList::mount_with_surface(kind, store, surface.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { store, columns })
    }

    fn column(&self, status: WorkItemStatus) -> Option<&ProjectList> {
        self.columns
            .iter()
            .find(|column| column.kind().status() == status)
            .map(|column| &**column)
    }

    fn add(&self, args: &str) -> String {
        let fields: Vec<&str> = args.split('|').collect();
        let [title, description, people] = fields.as_slice() else {
            return "usage: add <title> | <description> | <people>".to_string();
        };
        match ProjectForm::submit(self.store, title, description, people) {
            Ok(id) => format!("created {id}"),
            Err(err) => format!("error: {err}"),
        }
    }

    fn move_item(&self, args: &str) -> String {
        let Some((key, status)) = args.trim().rsplit_once(' ') else {
            return "usage: move <title-or-id-prefix> <active|finished>".to_string();
        };
        let status: WorkItemStatus = match status.parse() {
            Ok(status) => status,
            Err(err) => return format!("error: {err}"),
        };
        let Some(card) = self.columns.iter().find_map(|column| column.card(key)) else {
            return format!("error: no card matches `{}`", key.trim());
        };
        let Some(target) = self.column(status) else {
            return format!("error: no column shows {}", status.as_str());
        };

        let mut gesture = DragGesture::begin(&card);
        let result = gesture
            .hover(target)
            .and_then(|_| gesture.drop_on(target));
        gesture.end();

        match result {
            Ok(DropOutcome::Committed(TransitionOutcome::Applied)) => {
                format!("moved {} to {}", card.item().id, status.as_str())
            }
            Ok(DropOutcome::Committed(_)) => "nothing to do".to_string(),
            Ok(DropOutcome::Refused) => "drop refused".to_string(),
            Err(err) => format!("error: {err}"),
        }
    }

    fn list(&self) -> String {
        self.columns
            .iter()
            .flat_map(|column| column.render_lines())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn main() {
    let config = BoardConfig::from_env();
    if let Err(err) = init_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let board = match Board::mount() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("failed to render board: {err}");
            std::process::exit(1);
        }
    };

    println!("taskboard {} (type `help`)", taskboard_core::core_version());
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("event=stdin_read module=cli status=error");
                eprintln!("stdin read failed: {err}");
                break;
            }
        };
        let (command, args) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        let reply = match command {
            "" => continue,
            "add" => board.add(args),
            "move" => board.move_item(args),
            "list" => board.list(),
            "help" => HELP.to_string(),
            "quit" | "exit" => break,
            other => format!("unknown command `{other}`; type `help`"),
        };
        println!("{reply}");
    }
}
