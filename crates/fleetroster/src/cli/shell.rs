//! Interactive admin shell.
//!
//! The shell behaves like one browser tab: it starts on the entry page, keeps
//! its login flag in memory for as long as it runs, and on the admin page
//! hands each command to an [`AdminController`]. Filters live in that
//! controller, so they reset whenever the admin page is loaded again.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::DEFAULT_SESSION_KEY;
use crate::controller::{AdminController, Outcome, PageLoad, VehicleForm};
use crate::error::Result;
use crate::filter::ALL;
use crate::interaction::{Interaction, TerminalInteraction};
use crate::render::text;
use crate::repository::FleetRepository;
use crate::session::{Page, Session};
use crate::storage::{ItemStore, MemoryStore};
use crate::vehicle::{Category, CATEGORIES};

const ENTRY_HELP: &str = "\
Commands:
  login    Open the admin page
  help     Show this help
  quit     Leave the shell
";

const ADMIN_HELP: &str = "\
Commands:
  add                                Add a vehicle
  list                               Show vehicles matching the filters
  driver ID                          Change a vehicle's driver
  toggle ID                          Flip a vehicle's availability
  delete ID                          Delete a vehicle
  filter category All|Auto|Car|Truck|Bus
  filter availability All|Available|Unavailable
  clear                              Reset both filters
  logout                             End the session
  help                               Show this help
  quit                               Leave the shell
";

type Admin<'s, 'u, S, R, W> = AdminController<&'s mut S, &'u mut TerminalInteraction<R, W>>;

/// The interactive shell.
#[derive(Debug)]
pub struct Shell<S, R, W> {
    store: S,
    fleet_key: String,
    session: Session<MemoryStore>,
    ui: TerminalInteraction<R, W>,
}

impl<S: ItemStore, R: BufRead, W: Write> Shell<S, R, W> {
    /// A shell over the fleet `store`, keeping the fleet under `fleet_key`.
    pub fn new(store: S, fleet_key: impl Into<String>, ui: TerminalInteraction<R, W>) -> Self {
        Self::with_session_key(store, fleet_key, DEFAULT_SESSION_KEY, ui)
    }

    /// Like [`Shell::new`], with the login flag kept under `session_key`.
    pub fn with_session_key(
        store: S,
        fleet_key: impl Into<String>,
        session_key: impl Into<String>,
        ui: TerminalInteraction<R, W>,
    ) -> Self {
        Self {
            store,
            fleet_key: fleet_key.into(),
            session: Session::with_key(MemoryStore::new(), session_key),
            ui,
        }
    }

    /// Give back the fleet store and the terminal.
    pub fn into_parts(self) -> (S, TerminalInteraction<R, W>) {
        (self.store, self.ui)
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the fleet or the session cannot be written.
    pub fn run(&mut self) -> Result<()> {
        let mut page = Page::Entry;
        loop {
            debug!("Shell on {}", page);
            let next = match page {
                Page::Entry => self.entry_page()?,
                Page::Restricted => self.admin_page()?,
            };
            match next {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }
    }

    fn entry_page(&mut self) -> Result<Option<Page>> {
        self.ui
            .print("Fleet roster. Type 'login' to manage vehicles or 'help'.\n");

        loop {
            let Some(line) = self.ui.read_line("fleet>") else {
                return Ok(None);
            };
            match line.trim() {
                "" => {}
                "login" => {
                    self.session.login()?;
                    return Ok(Some(Page::Restricted));
                }
                "help" => self.ui.print(ENTRY_HELP),
                "quit" | "exit" => return Ok(None),
                other => self
                    .ui
                    .print(&format!("Unknown command '{other}'. Type 'help'.\n")),
            }
        }
    }

    fn admin_page(&mut self) -> Result<Option<Page>> {
        let Self {
            store,
            fleet_key,
            session,
            ui,
        } = self;

        let repository = FleetRepository::with_key(store, fleet_key.as_str());
        let mut controller = match AdminController::load(&*session, repository, ui) {
            PageLoad::Ready(controller) => controller,
            PageLoad::Redirect(page) => {
                info!("Admin page refused, going to {}", page);
                return Ok(Some(page));
            }
        };

        let count = controller.records().len();
        controller.interaction_mut().print(&format!(
            "Admin page: {count} vehicle(s). Type 'help' for commands.\n"
        ));

        loop {
            let Some(line) = controller.interaction_mut().read_line("admin>") else {
                return Ok(None);
            };
            let words: Vec<&str> = line.split_whitespace().collect();
            let Some((&command, args)) = words.split_first() else {
                continue;
            };

            match (command, args) {
                ("add", []) => {
                    if let Some(mut form) = read_form(&mut controller) {
                        let outcome = controller.add(&mut form)?;
                        show_outcome(&mut controller, &outcome);
                    }
                }
                ("list", []) => show_list(&mut controller),
                ("driver", [id]) => {
                    let outcome = controller.update_driver(id)?;
                    show_outcome(&mut controller, &outcome);
                }
                ("toggle", [id]) => {
                    let outcome = controller.toggle_availability(id)?;
                    show_outcome(&mut controller, &outcome);
                }
                ("delete", [id]) => {
                    let outcome = controller.delete(id)?;
                    show_outcome(&mut controller, &outcome);
                }
                ("filter", ["category", value]) => {
                    controller.set_category_filter(&category_value(value));
                    show_list(&mut controller);
                }
                ("filter", ["availability", value]) => {
                    controller.set_availability_filter(&availability_value(value));
                    show_list(&mut controller);
                }
                ("clear", []) => {
                    controller.clear_filters();
                    show_list(&mut controller);
                }
                ("logout", []) => {
                    controller.logout(session)?;
                    controller.interaction_mut().print("Logged out.\n");
                    return Ok(Some(Page::Entry));
                }
                ("help", []) => controller.interaction_mut().print(ADMIN_HELP),
                ("quit" | "exit", []) => return Ok(None),
                _ => controller
                    .interaction_mut()
                    .print(&format!("Cannot run '{}'. Type 'help'.\n", line.trim())),
            }
        }
    }
}

/// Fill the add form from prompts. `None` when input ends or the category is
/// not one of [`CATEGORIES`].
fn read_form<S: ItemStore, R: BufRead, W: Write>(
    controller: &mut Admin<'_, '_, S, R, W>,
) -> Option<VehicleForm> {
    let ui = controller.interaction_mut();
    let reg_no = ui.read_line("Reg No:")?;
    let category = ui.read_line("Category (Auto/Car/Truck/Bus):")?;
    let driver_name = ui.read_line("Driver Name:")?;

    let category = category.trim();
    let category = if category.is_empty() {
        String::new()
    } else if let Some(known) = lookup_category(category) {
        known.as_str().to_string()
    } else {
        let names: Vec<&str> = CATEGORIES.iter().map(Category::as_str).collect();
        ui.notify(&format!("Category must be one of {}", names.join(", ")));
        return None;
    };

    let is_available = ui.confirm("Available?");
    Some(VehicleForm::new(reg_no, category, driver_name, is_available))
}

fn show_outcome<S: ItemStore, R: BufRead, W: Write>(
    controller: &mut Admin<'_, '_, S, R, W>,
    outcome: &Outcome,
) {
    if outcome.is_applied() {
        show_list(controller);
    }
}

fn show_list<S: ItemStore, R: BufRead, W: Write>(controller: &mut Admin<'_, '_, S, R, W>) {
    let text = text::card_grid(&controller.visible_records());
    controller.interaction_mut().print(&text);
}

fn lookup_category(value: &str) -> Option<Category> {
    CATEGORIES
        .into_iter()
        .find(|category| category.as_str().eq_ignore_ascii_case(value))
}

fn category_value(value: &str) -> String {
    if value.eq_ignore_ascii_case(ALL) {
        ALL.to_string()
    } else {
        lookup_category(value).map_or_else(|| value.to_string(), |c| c.as_str().to_string())
    }
}

fn availability_value(value: &str) -> String {
    ["All", "Available", "Unavailable"]
        .into_iter()
        .find(|choice| choice.eq_ignore_ascii_case(value))
        .unwrap_or(value)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FLEET_KEY;
    use crate::vehicle::VehicleRecord;

    fn record(id: &str, category: &str, is_available: bool) -> VehicleRecord {
        VehicleRecord {
            id: id.to_string(),
            reg_no: format!("REG-{id}"),
            category: category.to_string(),
            driver_name: format!("Driver {id}"),
            is_available,
        }
    }

    fn seeded(records: &[VehicleRecord]) -> MemoryStore {
        let mut store = MemoryStore::new();
        FleetRepository::new(&mut store).write_all(records).unwrap();
        store
    }

    /// Run a shell over `store` with `input` and return the fleet and transcript.
    fn run(store: MemoryStore, input: &str) -> (Vec<VehicleRecord>, String) {
        let ui = TerminalInteraction::new(input.as_bytes(), Vec::new());
        let mut shell = Shell::new(store, DEFAULT_FLEET_KEY, ui);
        shell.run().unwrap();

        let (store, ui) = shell.into_parts();
        let records = FleetRepository::new(store).read_all();
        let output = String::from_utf8(ui.into_output()).unwrap();
        (records, output)
    }

    #[test]
    fn test_quit_from_entry() {
        let (records, output) = run(MemoryStore::new(), "quit\n");
        assert!(records.is_empty());
        assert!(output.contains("Type 'login'"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, output) = run(MemoryStore::new(), "");
        assert!(output.ends_with("fleet> "));
    }

    #[test]
    fn test_admin_commands_need_login() {
        let store = seeded(&[record("1", "Truck", true)]);
        let (_, output) = run(store, "list\nquit\n");
        assert!(output.contains("Unknown command 'list'"));
        assert!(!output.contains("REG-1"));
    }

    #[test]
    fn test_add_through_prompts() {
        let (records, output) = run(
            MemoryStore::new(),
            "login\nadd\n KA01 \ntruck\nSam\ny\nquit\n",
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reg_no, "KA01");
        assert_eq!(records[0].category, "Truck");
        assert_eq!(records[0].driver_name, "Sam");
        assert!(records[0].is_available);
        assert!(output.contains("Admin page: 0 vehicle(s)"));
        assert!(output.contains("KA01  ["));
    }

    #[test]
    fn test_add_with_blank_field_is_reported() {
        let (records, output) = run(MemoryStore::new(), "login\nadd\nKA01\nCar\n  \nn\nquit\n");
        assert!(records.is_empty());
        assert!(output.contains("Driver Name is required\n"));
    }

    #[test]
    fn test_add_with_unknown_category_is_refused() {
        let (records, output) = run(MemoryStore::new(), "login\nadd\nKA01\nTram\nSam\nquit\n");
        assert!(records.is_empty());
        assert!(output.contains("Category must be one of Auto, Car, Truck, Bus\n"));
    }

    #[test]
    fn test_toggle_and_delete() {
        let store = seeded(&[record("1", "Truck", true), record("2", "Bus", false)]);
        let (records, _) = run(store, "login\ntoggle 1\ndelete 2\ny\nquit\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert!(!records[0].is_available);
    }

    #[test]
    fn test_delete_declined_keeps_vehicle() {
        let store = seeded(&[record("1", "Truck", true)]);
        let (records, output) = run(store, "login\ndelete 1\nn\nquit\n");
        assert_eq!(records.len(), 1);
        assert!(output.contains("Are you sure you want to delete this vehicle? [y/N] "));
    }

    #[test]
    fn test_driver_keeps_current_name_on_empty_answer() {
        let store = seeded(&[record("1", "Truck", true)]);
        let (records, output) = run(store, "login\ndriver 1\n\nquit\n");
        assert_eq!(records[0].driver_name, "Driver 1");
        assert!(output.contains("Enter new driver name: [Driver 1] "));
    }

    #[test]
    fn test_driver_update() {
        let store = seeded(&[record("1", "Truck", true)]);
        let (records, _) = run(store, "login\ndriver 1\nRia\nquit\n");
        assert_eq!(records[0].driver_name, "Ria");
    }

    #[test]
    fn test_unknown_id_is_silent() {
        let store = seeded(&[record("1", "Truck", true)]);
        let (records, output) = run(store, "login\ndelete nope\nquit\n");
        assert_eq!(records.len(), 1);
        assert!(!output.contains("[y/N]"));
    }

    #[test]
    fn test_filters_and_clear() {
        let store = seeded(&[
            record("1", "Truck", true),
            record("2", "Bus", false),
            record("3", "Truck", false),
        ]);
        let (_, output) = run(
            store,
            "login\nfilter category truck\nfilter availability unavailable\nclear\nquit\n",
        );

        let sections: Vec<&str> = output.split("admin> ").collect();
        assert!(sections[1].contains("REG-1") && !sections[1].contains("REG-2"));
        assert!(sections[2].contains("REG-3") && !sections[2].contains("REG-1"));
        assert!(sections[3].contains("REG-1") && sections[3].contains("REG-2"));
    }

    #[test]
    fn test_filters_reset_on_next_login() {
        let store = seeded(&[record("1", "Truck", true), record("2", "Bus", true)]);
        let (_, output) = run(
            store,
            "login\nfilter category bus\nlogout\nlogin\nlist\nquit\n",
        );
        let last = output.rsplit("admin> ").nth(1).unwrap();
        assert!(last.contains("REG-1") && last.contains("REG-2"));
    }

    #[test]
    fn test_logout_returns_to_entry() {
        let (_, output) = run(MemoryStore::new(), "login\nlogout\nlist\nquit\n");
        assert!(output.contains("Logged out.\n"));
        assert!(output.contains("Unknown command 'list'"));
    }

    #[test]
    fn test_bad_admin_command() {
        let (_, output) = run(MemoryStore::new(), "login\ntoggle\nquit\n");
        assert!(output.contains("Cannot run 'toggle'"));
    }

    #[test]
    fn test_category_and_availability_values() {
        assert_eq!(category_value("all"), "All");
        assert_eq!(category_value("bUs"), "Bus");
        assert_eq!(category_value("Tram"), "Tram");
        assert_eq!(availability_value("available"), "Available");
        assert_eq!(availability_value("x"), "x");
    }
}
