use std::io::{BufRead, Write};
use std::mem;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::config::{Config, Layout};
use crate::cost::{CostError, CostQuote};
use crate::models::{ClassMetadata, Student};
use crate::roster::Roster;
use crate::store::RosterFile;
use crate::user_log::UserLog;

use super::console::{Console, StatusKind};
use super::input::{
    parse_age, parse_code, parse_cost, parse_currency, parse_gender, parse_int, parse_name,
    parse_yes_no, InputError,
};
use super::menu::{self, MenuAction};
use super::surface_error;

/// Where the menu loop is. `Dispatching` only lives for the span of one
/// operation; every operation hands control back to `Prompting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Prompting,
    Dispatching(MenuAction),
    Terminated,
}

/// One interactive session: the console, the roster it manages, and the
/// file it persists to.
pub struct Session<R, W> {
    console: Console<R, W>,
    layout: Layout,
    store: RosterFile,
    roster: Roster,
    metadata: Option<ClassMetadata>,
    tax_rate: f64,
    user_log: Option<UserLog>,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: &Config, input: R, output: W) -> Self {
        Self {
            console: Console::new(input, output),
            layout: config.layout,
            store: RosterFile::new(config.roster_path(), config.layout),
            roster: Roster::Empty,
            metadata: None,
            tax_rate: config.tax_rate,
            user_log: config.user_log.then(|| UserLog::new(config.user_log_path())),
            state: SessionState::Prompting,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn metadata(&self) -> Option<&ClassMetadata> {
        self.metadata.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn output(&self) -> &W {
        self.console.output()
    }

    /// Run the startup hook, then the menu loop until the user quits or
    /// input runs out. Only console failures surface as errors.
    pub fn run(&mut self) -> Result<()> {
        if let Some(user_log) = self.user_log.take() {
            user_log.capture(&mut self.console)?;
        }

        while self.state != SessionState::Terminated {
            self.state = match mem::replace(&mut self.state, SessionState::Prompting) {
                SessionState::Prompting => self.prompt_choice()?,
                SessionState::Dispatching(action) => self.dispatch(action)?,
                SessionState::Terminated => SessionState::Terminated,
            };
        }
        debug!("session terminated");
        Ok(())
    }

    fn prompt_choice(&mut self) -> Result<SessionState> {
        self.console.say(menu::render(self.layout))?;
        let layout = self.layout;
        let choice = self
            .console
            .prompt("Choice: ")?
            .and_then(|line| menu::parse_choice(layout, &line));

        match choice {
            Ok(action) => Ok(SessionState::Dispatching(action)),
            Err(InputError::EndOfInput) => {
                debug!("input closed, ending session");
                Ok(SessionState::Terminated)
            }
            Err(err) => {
                self.report(format!("Error: cannot identify your input ({err})"))?;
                Ok(SessionState::Prompting)
            }
        }
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<SessionState> {
        debug!("dispatching {action:?}");
        match action {
            MenuAction::CreateClass => self.create_class()?,
            MenuAction::ViewDetails => self.view_details()?,
            MenuAction::ViewThenSave => {
                self.view_students()?;
                self.save()?;
            }
            MenuAction::Save => self.save()?,
            MenuAction::Load => self.load()?,
            MenuAction::Cost => self.calculate_cost()?,
            MenuAction::Quit => return Ok(SessionState::Terminated),
        }
        Ok(SessionState::Prompting)
    }

    fn create_class(&mut self) -> Result<()> {
        let metadata = if self.layout.has_metadata() {
            match self.ask_metadata()? {
                Ok(metadata) => Some(metadata),
                Err(err) => return self.report(format!("Class not created: {err}")),
            }
        } else {
            None
        };

        let count = self
            .console
            .ask("Enter the number of students in the class: ", parse_int)?;
        let allocated = match count {
            Ok(count) => Roster::allocate(count).map_err(anyhow::Error::from),
            Err(err) => Err(err.into()),
        };
        self.metadata = None;
        match allocated {
            Ok(roster) => self.roster = roster,
            Err(err) => {
                self.roster = Roster::Empty;
                return self.report(format!("Class not created: {err}"));
            }
        }

        let total = self.roster.count();
        let filled = self.roster.fill_with(|slot| {
            read_student(&mut self.console, slot, total)
                .with_context(|| format!("student {} could not be added", slot + 1))
        });

        match filled {
            Ok(()) => {
                self.metadata = metadata;
                info!("created class of {total} students");
                self.console
                    .status("All students have been added.", StatusKind::Info)
            }
            // Anything other than a bad answer means the console is gone.
            Err(err) if err.downcast_ref::<InputError>().is_none() => Err(err),
            Err(err) => self.report(format!("{}. The class was discarded.", surface_error(err))),
        }
    }

    fn ask_metadata(&mut self) -> Result<Result<ClassMetadata, InputError>> {
        let mut codes = Vec::with_capacity(3);
        for (prompt, field) in [
            ("Enter the class category: ", "category"),
            ("Enter the course number: ", "course number"),
            ("Enter the section number: ", "section"),
        ] {
            match self.console.ask(prompt, |raw| parse_code(raw, field))? {
                Ok(code) => codes.push(code),
                Err(err) => return Ok(Err(err)),
            }
        }
        Ok(Ok(ClassMetadata::new(&codes[0], &codes[1], &codes[2])))
    }

    fn view_details(&mut self) -> Result<()> {
        match &self.metadata {
            Some(metadata) => {
                let text = format!("Class details:\n{metadata}");
                self.console.say(text)
            }
            None => self.report("No class data."),
        }
    }

    fn view_students(&mut self) -> Result<()> {
        let Some(lines) = self.roster.display_lines() else {
            return self.report("No student data.");
        };
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        match self.store.save(&self.roster, self.metadata.as_ref()) {
            Ok(()) => {
                let text = format!("Class of {} students saved.", self.roster.count());
                self.console.status(text, StatusKind::Info)
            }
            Err(err) => {
                warn!("save failed: {err}");
                self.report(format!("Save failed: {}", surface_error(err)))
            }
        }
    }

    /// A failed load leaves no class behind: whatever was in memory is
    /// dropped along with its metadata.
    fn load(&mut self) -> Result<()> {
        match self.store.load() {
            Ok(snapshot) => {
                self.roster = snapshot.roster;
                self.metadata = snapshot.metadata;
                let text = format!("Class of {} students loaded.", self.roster.count());
                self.console.status(text, StatusKind::Info)
            }
            Err(err) => {
                warn!("load failed: {err}");
                self.roster = Roster::Empty;
                self.metadata = None;
                self.report(format!("Read failed: {}", surface_error(err)))
            }
        }
    }

    fn calculate_cost(&mut self) -> Result<()> {
        if self.roster.is_empty() {
            return self.report(CostError::EmptyRoster);
        }

        let per_student = match self
            .console
            .ask("\tPlease enter the cost per student: ", parse_cost)?
        {
            Ok(cost) => cost,
            Err(err) => return self.report(err),
        };
        let tax_prompt = format!("\tApply {}% tax? [y/n]: ", self.tax_rate);
        let with_tax = match self.console.ask(&tax_prompt, parse_yes_no)? {
            Ok(answer) => answer,
            Err(err) => return self.report(err),
        };
        let currency = match self
            .console
            .ask("\tCurrency [1=USD $, 2=EUR €]: ", parse_currency)?
        {
            Ok(currency) => currency,
            Err(err) => return self.report(err),
        };

        let tax_rate = with_tax.then_some(self.tax_rate);
        match CostQuote::for_roster(&self.roster, per_student, tax_rate, currency) {
            Ok(quote) => self.console.say(format!("Total cost will be: {quote}")),
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, text: impl std::fmt::Display) -> Result<()> {
        self.console.status(text, StatusKind::Error)
    }
}

/// Prompt for one student's fields. Any bad answer ends the fill.
fn read_student<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    slot: usize,
    total: usize,
) -> Result<Student> {
    let name = console.ask("\tStudent Name: ", parse_name)??;
    let gender = console.ask("\tStudent Gender [1=Male, 2=Female, 3=Other]: ", parse_gender)??;
    let age = console.ask("\tStudent Age: ", parse_age)??;

    let remaining = total - slot - 1;
    console.say(format!(
        "Student added! {remaining} students left to add."
    ))?;
    Ok(Student::new(&name, gender, age))
}
